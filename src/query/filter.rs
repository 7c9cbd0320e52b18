//! Filter Builder
//!
//! Turns column/value pairs into a parameterised WHERE clause. Exact mode
//! compares with `=`, fuzzy mode with a case-insensitive `LIKE '%value%'`.
//! Date-of-birth values are split into year/month/day sub-predicates joined
//! by OR, so a partial date matches on whichever components were given.

use rusqlite::types::Value;
use serde::Serialize;

use super::error::QueryError;
use super::registry::Table;
use crate::db::LOWER_FN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    fn as_sql(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    Fuzzy,
}

/// Year, month and day of a date query; any component may be empty
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DateParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateParts {
    pub fn new(year: &str, month: &str, day: &str) -> Self {
        Self {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty() && self.month.is_empty() && self.day.is_empty()
    }

    /// Bound values for the year, month and day predicates, zero padded.
    /// Empty components stay empty and so never match.
    fn matchers(&self) -> [String; 3] {
        [
            pad(&self.year, 4),
            pad(&self.month, 2),
            pad(&self.day, 2),
        ]
    }
}

fn pad(component: &str, width: usize) -> String {
    if component.is_empty() {
        String::new()
    } else {
        format!("{:0>width$}", component, width = width)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Date(DateParts),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<DateParts> for FilterValue {
    fn from(d: DateParts) -> Self {
        Self::Date(d)
    }
}

/// A column -> value mapping against one table
#[derive(Debug, Clone)]
pub struct Filter {
    pub table: Table,
    conditions: Vec<(String, FilterValue)>,
    combinator: Combinator,
}

/// WHERE clause body and the values bound to its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub clause: String,
    pub params: Vec<Value>,
}

impl Predicate {
    /// `" WHERE ..."`, or nothing when the predicate matches every row
    pub fn where_clause(&self) -> String {
        if self.clause.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

impl Filter {
    /// Conditions joined with AND
    pub fn all(table: Table) -> Self {
        Self {
            table,
            conditions: Vec::new(),
            combinator: Combinator::And,
        }
    }

    /// Conditions joined with OR
    pub fn any(table: Table) -> Self {
        Self {
            table,
            conditions: Vec::new(),
            combinator: Combinator::Or,
        }
    }

    pub fn with(mut self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.conditions.push((column.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn build(&self, mode: MatchMode) -> Result<Predicate, QueryError> {
        let mut parts = Vec::with_capacity(self.conditions.len());
        let mut params = Vec::new();

        for (column, value) in &self.conditions {
            if !self.table.has_column(column) {
                return Err(QueryError::UnknownColumn {
                    table: self.table,
                    column: column.clone(),
                });
            }

            match (value, mode) {
                (FilterValue::Date(date), _) => {
                    let [year, month, day] = date.matchers();
                    parts.push(format!(
                        "(strftime('%Y', {0}) = ? OR strftime('%m', {0}) = ? OR strftime('%d', {0}) = ?)",
                        column
                    ));
                    params.extend([Value::Text(year), Value::Text(month), Value::Text(day)]);
                }
                (FilterValue::Text(s), MatchMode::Exact) => {
                    parts.push(format!("{} = ?", column));
                    params.push(Value::Text(s.clone()));
                }
                (FilterValue::Integer(i), MatchMode::Exact) => {
                    parts.push(format!("{} = ?", column));
                    params.push(Value::Integer(*i));
                }
                (FilterValue::Text(s), MatchMode::Fuzzy) => {
                    parts.push(contains_clause(column));
                    params.push(Value::Text(contains_pattern(s)));
                }
                (FilterValue::Integer(i), MatchMode::Fuzzy) => {
                    parts.push(contains_clause(column));
                    params.push(Value::Text(contains_pattern(&i.to_string())));
                }
            }
        }

        Ok(Predicate {
            clause: parts.join(self.combinator.as_sql()),
            params,
        })
    }
}

fn contains_clause(column: &str) -> String {
    format!("{}(CAST({} AS TEXT)) LIKE ? ESCAPE '\\'", LOWER_FN, column)
}

fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like(&s.to_lowercase()))
}

/// Escape LIKE metacharacters (% _ \)
fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
