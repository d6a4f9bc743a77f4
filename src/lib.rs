// mini-sql - a small query engine over delimited text files
// This is the library root that exposes the public API

pub mod error;
pub mod output;
pub mod query;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience
pub use error::{Result, SqlError};
pub use output::{format_rows, OutputFormat};
pub use query::{QueryExecutor, QueryParser, QueryPlan};
pub use session::{Console, Session, StdConsole};
pub use storage::loader::{load_table, CsvOptions};
pub use storage::{Catalog, Row, Table, Value};
