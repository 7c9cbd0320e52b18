//! Outcome Reporter
//!
//! Every command ends in one or more `Outcome`s. The presenter switches on
//! [`OutcomeKind`] to pick its message and on the payload to draw tables.

use serde::Serialize;

use super::classifier::Mode;
use super::filter::DateParts;
use super::registry::{col, Table};
use crate::models::Row;

/// Rows of one table, columns in [`Table::columns`] order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSet {
    pub table: Table,
    pub columns: &'static [&'static str],
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(table: Table, rows: Vec<Row>) -> Self {
        Self {
            table,
            columns: table.columns(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter_map(|row| row[col::ID].as_integer())
            .collect()
    }
}

/// A contact together with the phone numbers that matched it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactNumbers {
    pub contact: Row,
    pub numbers: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    // success
    TableDump { rows: RowSet },
    GroupContacts { group: String, contacts: RowSet },
    NumberContacts { contacts: Vec<ContactNumbers> },
    DateContacts { date: DateParts, contacts: RowSet },
    NameExact { contacts: RowSet },
    NameSimilar { contacts: RowSet },

    // valid, needs disambiguation
    AmbiguousGroup { query: String, candidates: RowSet },
    AmbiguousPrefix { query: String, candidates: RowSet },

    // not found
    NoGroup { query: String },
    NoNumberMatch { query: String },

    // validation
    UnknownFlag { flag: String },
    UnknownTable { name: String },
    NotANumber { token: String },
    MalformedDate { token: String },
    EmptyDate { token: String },
    NonNumericDate { token: String },
    MissingArgument { mode: Mode },
}

/// Payload-free tag of an [`Outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    AllContact,
    AllGroup,
    AllPrefix,
    AllPhoneNumber,
    GroupContact,
    NumberContact,
    DateContact,
    NameContact,
    NameSimilarContact,
    AmbiguousGroup,
    AmbiguousPrefix,
    NoGroup,
    NoNumberMatch,
    UnknownFlag,
    UnknownTable,
    NotANumber,
    MalformedDate,
    EmptyDate,
    NonNumericDate,
    MissingArgument,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::TableDump { rows } => match rows.table {
                Table::Contact => OutcomeKind::AllContact,
                Table::Group => OutcomeKind::AllGroup,
                Table::Prefix => OutcomeKind::AllPrefix,
                Table::PhoneNumber => OutcomeKind::AllPhoneNumber,
            },
            Self::GroupContacts { .. } => OutcomeKind::GroupContact,
            Self::NumberContacts { .. } => OutcomeKind::NumberContact,
            Self::DateContacts { .. } => OutcomeKind::DateContact,
            Self::NameExact { .. } => OutcomeKind::NameContact,
            Self::NameSimilar { .. } => OutcomeKind::NameSimilarContact,
            Self::AmbiguousGroup { .. } => OutcomeKind::AmbiguousGroup,
            Self::AmbiguousPrefix { .. } => OutcomeKind::AmbiguousPrefix,
            Self::NoGroup { .. } => OutcomeKind::NoGroup,
            Self::NoNumberMatch { .. } => OutcomeKind::NoNumberMatch,
            Self::UnknownFlag { .. } => OutcomeKind::UnknownFlag,
            Self::UnknownTable { .. } => OutcomeKind::UnknownTable,
            Self::NotANumber { .. } => OutcomeKind::NotANumber,
            Self::MalformedDate { .. } => OutcomeKind::MalformedDate,
            Self::EmptyDate { .. } => OutcomeKind::EmptyDate,
            Self::NonNumericDate { .. } => OutcomeKind::NonNumericDate,
            Self::MissingArgument { .. } => OutcomeKind::MissingArgument,
        }
    }

    /// The command produced rows
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::TableDump { .. }
                | Self::GroupContacts { .. }
                | Self::NumberContacts { .. }
                | Self::DateContacts { .. }
                | Self::NameExact { .. }
                | Self::NameSimilar { .. }
        )
    }

    /// Success or ambiguity; false for not-found and validation errors
    pub fn is_valid(&self) -> bool {
        self.is_success()
            || matches!(
                self,
                Self::AmbiguousGroup { .. } | Self::AmbiguousPrefix { .. }
            )
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlag { .. }
                | Self::UnknownTable { .. }
                | Self::NotANumber { .. }
                | Self::MalformedDate { .. }
                | Self::EmptyDate { .. }
                | Self::NonNumericDate { .. }
                | Self::MissingArgument { .. }
        )
    }

    /// The rows to draw, if any
    pub fn row_set(&self) -> Option<&RowSet> {
        match self {
            Self::TableDump { rows } => Some(rows),
            Self::GroupContacts { contacts, .. }
            | Self::DateContacts { contacts, .. }
            | Self::NameExact { contacts }
            | Self::NameSimilar { contacts } => Some(contacts),
            Self::AmbiguousGroup { candidates, .. } | Self::AmbiguousPrefix { candidates, .. } => {
                Some(candidates)
            }
            _ => None,
        }
    }
}
