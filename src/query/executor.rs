// Query Executor
// This module runs a parsed QueryPlan against the loaded tables.
// Every query is the same fixed pipeline:
//   resolve table -> optional WHERE filter -> COUNT or projection

use super::parser::{Condition, CountTarget, QueryPlan, SelectList};
use crate::error::{Result, SqlError};
use crate::storage::{Catalog, Row, Value};
use tracing::debug;

/// Name of the single column a COUNT query returns
pub const COUNT_COLUMN: &str = "count";

/// The query executor reads from a catalog of tables
/// It never modifies the tables; every result row is newly built
/// (or cloned unchanged for SELECT *).
pub struct QueryExecutor<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Execute a plan and return the result rows
    /// A COUNT query always returns exactly one row: {"count": N}
    pub fn execute(&self, plan: &QueryPlan) -> Result<Vec<Row>> {
        let table = self
            .catalog
            .get(&plan.from_table)
            .ok_or_else(|| SqlError::UnknownTable(plan.from_table.clone()))?;

        let rows: Vec<&Row> = match &plan.where_clause {
            Some(condition) => Self::filter(&table.rows, condition)?,
            None => table.rows.iter().collect(),
        };
        debug!(
            table = %table.name,
            scanned = table.rows.len(),
            matched = rows.len(),
            "applied filter"
        );

        match &plan.select {
            SelectList::Count(target) => Self::count(&rows, target),
            SelectList::All => Ok(rows.into_iter().cloned().collect()),
            SelectList::Columns(columns) => Self::project(&rows, columns),
        }
    }

    /// Keep the rows that satisfy the condition
    fn filter<'r>(rows: &'r [Row], condition: &Condition) -> Result<Vec<&'r Row>> {
        let mut matched = Vec::new();
        for row in rows {
            let cell = row
                .get(&condition.column)
                .ok_or_else(|| SqlError::ColumnNotFoundInWhere(condition.column.clone()))?;

            if Self::matches(cell, condition) {
                matched.push(row);
            }
        }
        Ok(matched)
    }

    /// Compare one cell against the condition's literal
    ///
    /// A numeric literal makes us read the cell as a number first; a cell
    /// that isn't a valid number simply doesn't match. A string literal is
    /// compared against the raw cell text.
    fn matches(cell: &Value, condition: &Condition) -> bool {
        let left = match (cell, condition.literal.is_numeric()) {
            (Value::Text(text), true) => Value::parse_number(text).unwrap_or(Value::Null),
            (other, _) => other.clone(),
        };
        condition.op.test(left.compare(&condition.literal))
    }

    /// COUNT(*) counts rows; COUNT(col) counts rows where col is neither
    /// null nor empty. A row without the column is an error.
    fn count(rows: &[&Row], target: &CountTarget) -> Result<Vec<Row>> {
        let count = match target {
            CountTarget::All => rows.len(),
            CountTarget::Column(column) => {
                let mut count = 0;
                for row in rows {
                    let value = row
                        .get(column)
                        .ok_or_else(|| SqlError::ColumnNotFoundForCount(column.clone()))?;
                    let present = match value {
                        Value::Null => false,
                        Value::Text(text) => !text.is_empty(),
                        _ => true,
                    };
                    if present {
                        count += 1;
                    }
                }
                count
            }
        };

        Ok(vec![Row::new(vec![(
            COUNT_COLUMN.to_string(),
            Value::Integer(count as i64),
        )])])
    }

    /// Build new rows holding exactly the requested columns, in order
    fn project(rows: &[&Row], columns: &[String]) -> Result<Vec<Row>> {
        rows.iter()
            .map(|row| {
                row.project(columns)
                    .map_err(|missing| SqlError::SelectedColumnNotFound(missing.to_string()))
            })
            .collect()
    }
}
