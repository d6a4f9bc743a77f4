// SQL Parser
// This module converts query text into a QueryPlan.
// The grammar is small enough that we split on keywords directly:
//
//   SELECT <select-list> FROM <table> [WHERE <column> <op> <literal>] [;]

use crate::error::{Result, SqlError};
use crate::storage::Value;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

const SELECT_KEYWORD: &str = "SELECT ";
const FROM_KEYWORD: &str = " FROM ";
const WHERE_KEYWORD: &str = " WHERE ";
const COUNT_PREFIX: &str = "COUNT(";

/// The parsed form of a query, consumed by the executor
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub select: SelectList,
    pub from_table: String,
    pub where_clause: Option<Condition>,
}

/// What the SELECT asks for. Exactly one shape per query.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    /// SELECT *
    All,
    /// SELECT col1, col2, ...
    Columns(Vec<String>),
    /// SELECT COUNT(*) or SELECT COUNT(col)
    Count(CountTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountTarget {
    All,
    Column(String),
}

/// A single WHERE condition: column <op> literal
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: Operator,
    pub literal: Value,
}

/// Comparison operators allowed in WHERE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl Operator {
    /// Search order when splitting a condition. Two-character operators
    /// come first so `>=` is never read as `>` followed by `=`.
    pub const SEARCH_ORDER: [Operator; 6] = [
        Operator::NotEq,
        Operator::GtEq,
        Operator::LtEq,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
        }
    }

    /// Apply the operator to the result of comparing left against right.
    /// `None` means the pair can't be compared, which never matches.
    pub fn test(&self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::NotEq => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
            Operator::GtEq => ordering != Ordering::Less,
            Operator::LtEq => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The query parser
pub struct QueryParser;

impl QueryParser {
    /// Parse query text into a QueryPlan
    /// This is the main entry point for parsing SQL
    pub fn parse(sql: &str) -> Result<QueryPlan> {
        let sql = sql.trim().trim_end_matches(';').trim();
        if sql.is_empty() {
            return Err(SqlError::EmptyQuery);
        }

        // ASCII uppercasing keeps byte offsets identical to `sql`,
        // so positions found in `upper` can slice the original text
        let upper = sql.to_ascii_uppercase();
        if !upper.starts_with(SELECT_KEYWORD) {
            return Err(SqlError::NotASelectStatement);
        }

        let from_index = upper
            .find(FROM_KEYWORD)
            .ok_or(SqlError::MissingFromClause)?;
        let select_part = sql[SELECT_KEYWORD.len() - 1..from_index].trim();
        let rest = &sql[from_index + FROM_KEYWORD.len()..];

        let (table_part, where_part) = Self::split_where(rest)?;
        if table_part.is_empty() {
            return Err(SqlError::MissingTableName);
        }

        let select = Self::parse_select_list(select_part)?;
        let where_clause = match where_part {
            Some(condition) => Some(Self::parse_condition(condition)?),
            None => None,
        };

        let plan = QueryPlan {
            select,
            from_table: table_part.to_string(),
            where_clause,
        };
        debug!(?plan, "parsed query");
        Ok(plan)
    }

    /// Split "table [WHERE condition]" into its two parts, both trimmed
    fn split_where(rest: &str) -> Result<(&str, Option<&str>)> {
        // Pad with a space on each side so a WHERE keyword at either end
        // of the text is still found as " WHERE "
        let rest = rest.trim();
        let padded = format!(" {} ", rest);
        match padded.to_ascii_uppercase().find(WHERE_KEYWORD) {
            None => Ok((rest, None)),
            Some(index) => {
                // padded[i] == rest[i - 1]
                let table = rest[..index.saturating_sub(1)].trim();
                let start = (index + WHERE_KEYWORD.len() - 1).min(rest.len());
                let condition = rest[start..].trim();
                if condition.is_empty() {
                    return Err(SqlError::EmptyWhereCondition);
                }
                Ok((table, Some(condition)))
            }
        }
    }

    /// Parse the text between SELECT and FROM
    fn parse_select_list(part: &str) -> Result<SelectList> {
        let upper = part.to_ascii_uppercase();

        if upper.starts_with(COUNT_PREFIX) {
            if upper == "COUNT(*)" {
                return Ok(SelectList::Count(CountTarget::All));
            }
            if !upper.ends_with(')') {
                return Err(SqlError::InvalidCountSyntax);
            }
            let inner = part[COUNT_PREFIX.len()..part.len() - 1].trim();
            if inner.is_empty() || inner.contains(&['(', ')', ','][..]) {
                return Err(SqlError::InvalidCountSyntax);
            }
            if inner == "*" {
                return Ok(SelectList::Count(CountTarget::All));
            }
            return Ok(SelectList::Count(CountTarget::Column(inner.to_string())));
        }

        if part == "*" {
            return Ok(SelectList::All);
        }

        let columns: Vec<String> = part.split(',').map(|c| c.trim().to_string()).collect();
        if columns.iter().any(|c| c.is_empty()) {
            return Err(SqlError::InvalidColumnList);
        }
        Ok(SelectList::Columns(columns))
    }

    /// Parse a single condition. The first operator (in search order) that
    /// appears anywhere in the text is the one that splits it.
    fn parse_condition(text: &str) -> Result<Condition> {
        for op in Operator::SEARCH_ORDER {
            if let Some(index) = text.find(op.as_str()) {
                let column = text[..index].trim();
                let literal = text[index + op.as_str().len()..].trim();
                if column.is_empty() || literal.is_empty() {
                    return Err(SqlError::InvalidWhereCondition);
                }
                return Ok(Condition {
                    column: column.to_string(),
                    op,
                    literal: Self::parse_literal(literal),
                });
            }
        }
        Err(SqlError::UnsupportedOperator)
    }

    /// Quoted text becomes a string with the quotes removed (no escapes),
    /// anything else is tried as a number and falls back to a string.
    /// A lone quote character counts as quoted and yields an empty string.
    fn parse_literal(text: &str) -> Value {
        let quoted = (text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"'));
        if quoted {
            let inner = if text.len() >= 2 { &text[1..text.len() - 1] } else { "" };
            return Value::Text(inner.to_string());
        }
        Value::parse_number(text).unwrap_or_else(|| Value::Text(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(sql: &str) -> SqlError {
        QueryParser::parse(sql).unwrap_err()
    }

    #[test]
    fn test_select_star() {
        let plan = QueryParser::parse("SELECT * FROM people").unwrap();
        assert_eq!(plan.select, SelectList::All);
        assert_eq!(plan.from_table, "people");
        assert_eq!(plan.where_clause, None);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let plan = QueryParser::parse("select name from People where Age >= 30;").unwrap();
        assert_eq!(plan.select, SelectList::Columns(vec!["name".to_string()]));
        assert_eq!(plan.from_table, "People");
        let cond = plan.where_clause.unwrap();
        assert_eq!(cond.column, "Age");
        assert_eq!(cond.op, Operator::GtEq);
        assert_eq!(cond.literal, Value::Integer(30));
    }

    #[test]
    fn test_column_list_is_trimmed_and_ordered() {
        let plan = QueryParser::parse("SELECT  country , name FROM t").unwrap();
        assert_eq!(
            plan.select,
            SelectList::Columns(vec!["country".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn test_count_forms() {
        let plan = QueryParser::parse("SELECT COUNT(*) FROM t").unwrap();
        assert_eq!(plan.select, SelectList::Count(CountTarget::All));

        let plan = QueryParser::parse("SELECT count( email ) FROM t").unwrap();
        assert_eq!(
            plan.select,
            SelectList::Count(CountTarget::Column("email".to_string()))
        );

        let plan = QueryParser::parse("SELECT COUNT( * ) FROM t").unwrap();
        assert_eq!(plan.select, SelectList::Count(CountTarget::All));
    }

    #[test]
    fn test_trailing_semicolon_is_optional() {
        let with = QueryParser::parse("SELECT * FROM t WHERE a = 1;").unwrap();
        let without = QueryParser::parse("SELECT * FROM t WHERE a = 1").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_two_char_operators_take_priority() {
        let cases = [
            ("age >= 30", Operator::GtEq),
            ("age <= 30", Operator::LtEq),
            ("age != 30", Operator::NotEq),
            ("age > 30", Operator::Gt),
            ("age < 30", Operator::Lt),
            ("age = 30", Operator::Eq),
            ("age>=30", Operator::GtEq),
        ];
        for (condition, expected) in cases {
            let plan = QueryParser::parse(&format!("SELECT * FROM t WHERE {}", condition)).unwrap();
            let cond = plan.where_clause.unwrap();
            assert_eq!(cond.op, expected, "condition: {}", condition);
            assert_eq!(cond.column, "age");
            assert_eq!(cond.literal, Value::Integer(30));
        }
    }

    #[test]
    fn test_literal_coercion() {
        let literal = |sql: &str| QueryParser::parse(sql).unwrap().where_clause.unwrap().literal;

        assert_eq!(literal("SELECT * FROM t WHERE c = 'India'"), Value::from("India"));
        assert_eq!(literal("SELECT * FROM t WHERE c = \"US\""), Value::from("US"));
        assert_eq!(literal("SELECT * FROM t WHERE c = '42'"), Value::from("42"));
        assert_eq!(literal("SELECT * FROM t WHERE c = 42"), Value::Integer(42));
        assert_eq!(literal("SELECT * FROM t WHERE c = 4.5"), Value::Float(4.5));
        assert_eq!(literal("SELECT * FROM t WHERE c = India"), Value::from("India"));
        assert_eq!(literal("SELECT * FROM t WHERE c = ''"), Value::from(""));
    }

    #[test]
    fn test_lone_quote_is_an_empty_string() {
        let literal = |sql: &str| QueryParser::parse(sql).unwrap().where_clause.unwrap().literal;

        assert_eq!(literal("SELECT * FROM t WHERE c = '"), Value::from(""));
        assert_eq!(literal("SELECT * FROM t WHERE c = \""), Value::from(""));
    }

    #[test]
    fn test_integer_literal_beyond_i64_stays_numeric() {
        let plan = QueryParser::parse("SELECT id FROM t WHERE id > 99999999999999999999").unwrap();
        let cond = plan.where_clause.unwrap();
        assert_eq!(cond.op, Operator::Gt);
        assert_eq!(cond.literal, Value::Float(1e20));
    }

    #[test]
    fn test_where_keyword_inside_names_is_not_a_clause() {
        let plan = QueryParser::parse("SELECT * FROM nowhere").unwrap();
        assert_eq!(plan.from_table, "nowhere");
        assert_eq!(plan.where_clause, None);
    }

    #[test]
    fn test_empty_query() {
        assert!(matches!(parse_err(""), SqlError::EmptyQuery));
        assert!(matches!(parse_err("   "), SqlError::EmptyQuery));
        assert!(matches!(parse_err(";"), SqlError::EmptyQuery));
    }

    #[test]
    fn test_not_a_select() {
        assert!(matches!(parse_err("SELCT * FROM t"), SqlError::NotASelectStatement));
        assert!(matches!(parse_err("DELETE FROM t"), SqlError::NotASelectStatement));
    }

    #[test]
    fn test_missing_from() {
        let err = parse_err("SELECT * t");
        assert!(matches!(err, SqlError::MissingFromClause));
        assert!(err.to_string().contains("FROM"));
        assert!(matches!(parse_err("SELECT * FROM"), SqlError::MissingFromClause));
    }

    #[test]
    fn test_missing_table_name() {
        assert!(matches!(
            parse_err("SELECT * FROM  WHERE a = 1"),
            SqlError::MissingTableName
        ));
    }

    #[test]
    fn test_empty_where_condition() {
        assert!(matches!(
            parse_err("SELECT * FROM t WHERE"),
            SqlError::EmptyWhereCondition
        ));
        assert!(matches!(
            parse_err("SELECT * FROM t WHERE ;"),
            SqlError::EmptyWhereCondition
        ));
    }

    #[test]
    fn test_invalid_count() {
        for sql in [
            "SELECT COUNT() FROM t",
            "SELECT COUNT(a FROM t",
            "SELECT COUNT(a), b FROM t",
            "SELECT COUNT(a), COUNT(b) FROM t",
        ] {
            assert!(
                matches!(parse_err(sql), SqlError::InvalidCountSyntax),
                "sql: {}",
                sql
            );
        }
    }

    #[test]
    fn test_invalid_column_list() {
        assert!(matches!(parse_err("SELECT a, FROM t"), SqlError::InvalidColumnList));
        assert!(matches!(parse_err("SELECT a,,b FROM t"), SqlError::InvalidColumnList));
        assert!(matches!(parse_err("SELECT FROM t"), SqlError::InvalidColumnList));
    }

    #[test]
    fn test_invalid_condition() {
        assert!(matches!(
            parse_err("SELECT * FROM t WHERE = 5"),
            SqlError::InvalidWhereCondition
        ));
        assert!(matches!(
            parse_err("SELECT * FROM t WHERE age >="),
            SqlError::InvalidWhereCondition
        ));
    }

    #[test]
    fn test_unsupported_operator() {
        let err = parse_err("SELECT * FROM t WHERE name LIKE 'A%'");
        assert!(matches!(err, SqlError::UnsupportedOperator));
        assert!(err.to_string().contains("Unsupported operator"));
    }

    #[test]
    fn test_operator_test() {
        use Ordering::*;
        assert!(Operator::GtEq.test(Some(Equal)));
        assert!(Operator::GtEq.test(Some(Greater)));
        assert!(!Operator::GtEq.test(Some(Less)));
        assert!(Operator::NotEq.test(Some(Less)));
        assert!(!Operator::NotEq.test(None));
        assert!(!Operator::Eq.test(None));
    }
}
