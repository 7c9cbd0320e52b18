//! Fallback Query Executor
//!
//! Runs a filter in exact mode and, only when that finds nothing, once more
//! in fuzzy mode. There is never a second fallback.

use rusqlite::types::Value;
use tracing::debug;

use super::error::QueryError;
use super::filter::{Filter, MatchMode};
use crate::db::Database;
use crate::models::Row;

/// The single read primitive the engine needs from the store
pub trait QuerySource {
    fn run_query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Vec<Row>>;
}

impl QuerySource for Database {
    fn run_query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Vec<Row>> {
        Database::run_query(self, sql, params)
    }
}

/// Rows found by [`execute`] and the mode that found them
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub rows: Vec<Row>,
    pub mode: MatchMode,
}

impl Matched {
    pub fn is_exact(&self) -> bool {
        self.mode == MatchMode::Exact
    }
}

/// Run `filter` once in the given mode
pub fn select<S: QuerySource + ?Sized>(
    source: &S,
    filter: &Filter,
    mode: MatchMode,
) -> Result<Vec<Row>, QueryError> {
    let predicate = filter.build(mode)?;
    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY id",
        filter.table.columns().join(", "),
        filter.table.sql_name(),
        predicate.where_clause()
    );
    let rows = source.run_query(&sql, &predicate.params)?;
    debug!(table = filter.table.sql_name(), ?mode, rows = rows.len(), "select");
    Ok(rows)
}

/// Exact first; fuzzy only if exact found no rows
pub fn execute<S: QuerySource + ?Sized>(source: &S, filter: &Filter) -> Result<Matched, QueryError> {
    let rows = select(source, filter, MatchMode::Exact)?;
    if !rows.is_empty() {
        return Ok(Matched {
            rows,
            mode: MatchMode::Exact,
        });
    }

    debug!(table = filter.table.sql_name(), "no exact match, falling back to fuzzy");
    let rows = select(source, filter, MatchMode::Fuzzy)?;
    Ok(Matched {
        rows,
        mode: MatchMode::Fuzzy,
    })
}
