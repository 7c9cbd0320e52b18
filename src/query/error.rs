use thiserror::Error;

use super::registry::Table;

/// Errors raised by the query engine itself.
///
/// Everything a user can type wrong is reported as an `Outcome` instead;
/// these are the conditions that abort a command.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A filter named a column the table does not have
    #[error("Unknown column '{column}' for table '{}'", table.sql_name())]
    UnknownColumn { table: Table, column: String },

    /// No table matches the given alias
    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
