//! Static description of the four tables and the names users may type for them.

use serde::Serialize;

use super::error::QueryError;

/// Column positions within rows selected in [`Table::columns`] order
pub mod col {
    pub const ID: usize = 0;
    pub const CONTACT_FIRST_NAME: usize = 1;
    pub const CONTACT_LAST_NAME: usize = 2;
    pub const CONTACT_GROUP_ID: usize = 4;
    pub const GROUP_NAME: usize = 1;
    pub const PREFIX_CODE: usize = 1;
    pub const PHONE_PREFIX_ID: usize = 1;
    pub const PHONE_NUMBER: usize = 2;
    pub const PHONE_CONTACT_ID: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Contact,
    Group,
    Prefix,
    PhoneNumber,
}

impl Table {
    pub const ALL: &'static [Table] = &[
        Table::Contact,
        Table::Group,
        Table::Prefix,
        Table::PhoneNumber,
    ];

    /// Name of the table in the store
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Group => "contact_group",
            Self::Prefix => "prefix",
            Self::PhoneNumber => "phone_number",
        }
    }

    /// Columns in select order; `id` is always first
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Contact => &[
                "id",
                "first_name",
                "last_name",
                "date_of_birth",
                "group_id",
                "street",
                "house_number",
                "city",
            ],
            Self::Group => &["id", "name"],
            Self::Prefix => &["id", "prefix", "state"],
            Self::PhoneNumber => &["id", "prefix_id", "number", "contact_id"],
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Contact => &["contact", "contacts", "c"],
            Self::Group => &["group", "groups", "g", "contact_group"],
            Self::Prefix => &["prefix", "prefixes", "p"],
            Self::PhoneNumber => &["phone_number", "number", "numbers", "phone", "phones", "n"],
        }
    }

    /// Resolve a user-typed table name, ignoring case
    pub fn from_alias(s: &str) -> Result<Self, QueryError> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|table| table.aliases().contains(&lower.as_str()))
            .ok_or_else(|| QueryError::UnknownTable(s.to_string()))
    }

    pub fn column_index(self, column: &str) -> Option<usize> {
        self.columns().iter().position(|c| *c == column)
    }

    pub fn has_column(self, column: &str) -> bool {
        self.column_index(column).is_some()
    }
}
