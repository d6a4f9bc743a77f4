// Storage module - in-memory tables loaded from delimited text
// Rows keep cells as raw text; typed values only appear in literals,
// numeric coercion during filtering, and synthetic aggregate rows.

pub mod loader;
pub mod table;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::num::IntErrorKind;

pub use table::{Catalog, Table};

/// A cell or literal value
/// Loaded cells are always Text (or Null when the record was short),
/// literals parsed from a WHERE clause may be numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Parse text as a number: Float when it contains a decimal point,
    /// Integer otherwise. Integers too large for i64 become Float so they
    /// still compare numerically. Returns None when the text isn't a number.
    pub fn parse_number(text: &str) -> Option<Value> {
        let text = text.trim();
        if text.contains('.') {
            return text.parse::<f64>().ok().map(Value::Float);
        }
        match text.parse::<i64>() {
            Ok(i) => Some(Value::Integer(i)),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                text.parse::<f64>().ok().map(Value::Float)
            }
            Err(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Compare two values (used for WHERE clauses)
    /// Integers and floats compare with each other numerically, text compares
    /// with text. Anything else, Null included, is incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// A single row: column name to value, in column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new(cells: Vec<(String, Value)>) -> Self {
        Self { cells }
    }

    /// Build a row of text cells, the shape the loader produces
    pub fn from_text<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::Text(v.into())))
            .collect()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Build a new row with exactly the given columns, in the given order
    /// Returns the first missing column name on failure.
    pub fn project<'a>(&self, columns: &'a [String]) -> std::result::Result<Row, &'a str> {
        columns
            .iter()
            .map(|col| match self.get(col) {
                Some(value) => Ok((col.clone(), value.clone())),
                None => Err(col.as_str()),
            })
            .collect()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

// Rows serialize as JSON objects, keeping column order
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
