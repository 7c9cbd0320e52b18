//! Replace stored foreign keys with values a person can read.
//!
//! Only integer cells are touched, so enriching a row twice changes nothing
//! the second time. Null or dangling references become `Cell::Null`.

use std::collections::HashMap;

use super::error::QueryError;
use super::executor::{select, QuerySource};
use super::filter::{Filter, MatchMode};
use super::registry::{col, Table};
use crate::models::{Cell, Prefix, Row};

/// Apply the enrichment appropriate for rows of `table`
pub fn enrich<S: QuerySource + ?Sized>(
    source: &S,
    table: Table,
    rows: &mut [Row],
) -> Result<(), QueryError> {
    match table {
        Table::Contact => group_names(source, rows),
        Table::PhoneNumber => phone_numbers(source, rows),
        Table::Prefix => {
            prefix_codes(rows);
            Ok(())
        }
        Table::Group => Ok(()),
    }
}

/// contact.group_id -> group name
pub fn group_names<S: QuerySource + ?Sized>(source: &S, rows: &mut [Row]) -> Result<(), QueryError> {
    let mut lookup = Lookup::new(Table::Group, |row| row[col::GROUP_NAME].clone());
    for row in rows.iter_mut() {
        if let Some(id) = row[col::CONTACT_GROUP_ID].as_integer() {
            row[col::CONTACT_GROUP_ID] = lookup.get(source, id)?;
        }
    }
    Ok(())
}

/// prefix.prefix -> "+code"
pub fn prefix_codes(rows: &mut [Row]) {
    for row in rows.iter_mut() {
        if let Some(code) = row[col::PREFIX_CODE].as_integer() {
            row[col::PREFIX_CODE] = Cell::Text(Prefix::display_code(code));
        }
    }
}

/// phone_number.prefix_id -> "+code", phone_number.contact_id -> "first last"
pub fn phone_numbers<S: QuerySource + ?Sized>(source: &S, rows: &mut [Row]) -> Result<(), QueryError> {
    let mut prefixes = Lookup::new(Table::Prefix, |row| match row[col::PREFIX_CODE].as_integer() {
        Some(code) => Cell::Text(Prefix::display_code(code)),
        None => Cell::Null,
    });
    let mut contacts = Lookup::new(Table::Contact, |row| Cell::Text(contact_name(row)));

    for row in rows.iter_mut() {
        if let Some(id) = row[col::PHONE_PREFIX_ID].as_integer() {
            row[col::PHONE_PREFIX_ID] = prefixes.get(source, id)?;
        }
        if let Some(id) = row[col::PHONE_CONTACT_ID].as_integer() {
            row[col::PHONE_CONTACT_ID] = contacts.get(source, id)?;
        }
    }
    Ok(())
}

/// "first last" from a contact row
pub fn contact_name(row: &Row) -> String {
    [&row[col::CONTACT_FIRST_NAME], &row[col::CONTACT_LAST_NAME]]
        .into_iter()
        .filter_map(Cell::as_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Memoised id -> display value lookup against one table
struct Lookup<F> {
    table: Table,
    render: F,
    cache: HashMap<i64, Cell>,
}

impl<F: Fn(&Row) -> Cell> Lookup<F> {
    fn new(table: Table, render: F) -> Self {
        Self {
            table,
            render,
            cache: HashMap::new(),
        }
    }

    fn get<S: QuerySource + ?Sized>(&mut self, source: &S, id: i64) -> Result<Cell, QueryError> {
        if let Some(cell) = self.cache.get(&id) {
            return Ok(cell.clone());
        }
        let rows = select(source, &Filter::all(self.table).with("id", id), MatchMode::Exact)?;
        let cell = rows.first().map(&self.render).unwrap_or(Cell::Null);
        self.cache.insert(id, cell.clone());
        Ok(cell)
    }
}
