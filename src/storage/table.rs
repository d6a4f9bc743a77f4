// Table implementation
// A table is a header plus the rows read from one file. Tables are
// read-only once loaded; queries only ever build new rows from them.

use super::Row;
use crate::error::{Result, SqlError};
use std::collections::HashMap;

/// Represents a loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The name of the table (the file stem it was loaded from)
    pub name: String,
    /// Column names, in header order
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a table from rows alone, taking the column set from the first row
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.columns().map(String::from).collect())
            .unwrap_or_default();
        Self::new(name, columns, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// The collection of tables a session queries against
/// Looked up by exact table name. Once built it is only read, so a single
/// catalog can be shared between any number of readers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from several tables, rejecting repeated names
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Self> {
        let mut catalog = Self::new();
        for table in tables {
            catalog.insert(table)?;
        }
        Ok(catalog)
    }

    /// Add a table, rejecting a name that is already taken
    pub fn insert(&mut self, table: Table) -> Result<()> {
        if self.tables.contains_key(&table.name) {
            return Err(SqlError::DuplicateTable(table.name));
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names, sorted for stable output
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }
}
