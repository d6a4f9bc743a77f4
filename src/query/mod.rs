// Query module - parses query text and executes plans
pub mod executor;
pub mod parser;

pub use executor::QueryExecutor;
pub use parser::{Condition, CountTarget, Operator, QueryParser, QueryPlan, SelectList};
