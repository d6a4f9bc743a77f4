// Delimited text loader
// Reads a header row plus data records into a Table named after the file.

use super::{Row, Table, Value};
use crate::error::{Result, SqlError};
use std::path::Path;
use tracing::{info, warn};

/// Options for reading delimited files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator, a single ASCII byte
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Load one delimited file as a table
///
/// The table name is the file stem ("people" for "data/people.csv").
/// Short records are padded with `Value::Null`; fields past the header
/// width are dropped.
pub fn load_table(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SqlError::FileNotFound(path.to_path_buf()));
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > columns.len() {
            warn!(
                table = %name,
                record = index + 1,
                extra = record.len() - columns.len(),
                "dropping fields beyond the header"
            );
        }

        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let value = record
                    .get(i)
                    .map(|field| Value::Text(field.to_string()))
                    .unwrap_or(Value::Null);
                (col.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(SqlError::EmptyFile(path.to_path_buf()));
    }

    info!(table = %name, rows = rows.len(), columns = columns.len(), "loaded table");
    Ok(Table::new(name, columns, rows))
}
