// Error types
// Every failure the parser, executor and loader can raise is one variant here,
// so callers can match on the exact kind while users just see the message.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SqlError>;

/// The single user-facing error kind
#[derive(Error, Debug)]
pub enum SqlError {
    // Parser errors
    #[error("Empty query")]
    EmptyQuery,

    #[error("Query must start with SELECT")]
    NotASelectStatement,

    #[error("Missing FROM clause")]
    MissingFromClause,

    #[error("Missing table name in FROM clause")]
    MissingTableName,

    #[error("Empty WHERE condition")]
    EmptyWhereCondition,

    #[error("Invalid COUNT syntax")]
    InvalidCountSyntax,

    #[error("Invalid column list in SELECT")]
    InvalidColumnList,

    #[error("Invalid WHERE condition")]
    InvalidWhereCondition,

    #[error("Unsupported operator in WHERE (allowed: =, !=, >, <, >=, <=)")]
    UnsupportedOperator,

    // Executor errors
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Column in WHERE not found: {0}")]
    ColumnNotFoundInWhere(String),

    #[error("Column not found for COUNT: {0}")]
    ColumnNotFoundForCount(String),

    #[error("Selected column not found: {0}")]
    SelectedColumnNotFound(String),

    // Loader errors
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("CSV file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Table '{0}' is already loaded")]
    DuplicateTable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqlError {
    /// True for errors raised while parsing query text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SqlError::EmptyQuery
                | SqlError::NotASelectStatement
                | SqlError::MissingFromClause
                | SqlError::MissingTableName
                | SqlError::EmptyWhereCondition
                | SqlError::InvalidCountSyntax
                | SqlError::InvalidColumnList
                | SqlError::InvalidWhereCondition
                | SqlError::UnsupportedOperator
        )
    }

    /// True for errors raised while running a plan against tables
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            SqlError::UnknownTable(_)
                | SqlError::ColumnNotFoundInWhere(_)
                | SqlError::ColumnNotFoundForCount(_)
                | SqlError::SelectedColumnNotFound(_)
        )
    }
}
