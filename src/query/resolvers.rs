//! One resolver per search mode.
//!
//! Each resolver takes the accumulator and a single argument token, runs its
//! queries and records outcomes. Failures are recorded as outcomes too; only
//! storage errors are returned.

use std::collections::HashSet;

use tracing::debug;

use super::enrich::{enrich, group_names, phone_numbers};
use super::error::QueryError;
use super::executor::{execute, select, QuerySource};
use super::filter::{DateParts, Filter, FilterValue, MatchMode};
use super::outcome::{ContactNumbers, Outcome, RowSet};
use super::registry::{col, Table};
use crate::models::Row;

/// Result state threaded through the resolvers of one command
#[derive(Debug, Default)]
pub struct Accumulator {
    outcomes: Vec<Outcome>,
    names: Option<NameHits>,
    numbers: Option<NumberHits>,
}

#[derive(Debug, Default)]
struct NameHits {
    rows: Vec<Row>,
    similar: bool,
}

#[derive(Debug, Default)]
struct NumberHits {
    /// Phone numbers under the last `+code` token
    prefix: Option<Vec<Row>>,
    /// Set once a plain number token has been looked up
    searched: bool,
    contacts: Vec<ContactNumbers>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processing stops once anything other than a success was recorded
    pub fn halted(&self) -> bool {
        self.outcomes.last().is_some_and(|o| !o.is_success())
    }

    pub fn push(&mut self, outcome: Outcome) {
        debug!(kind = ?outcome.kind(), "outcome");
        self.outcomes.push(outcome);
    }

    /// Close any name or number segment still collecting rows
    pub fn flush<S: QuerySource + ?Sized>(&mut self, source: &S) -> Result<(), QueryError> {
        if let Some(hits) = self.names.take() {
            let contacts = RowSet::new(Table::Contact, hits.rows);
            self.push(if hits.similar {
                Outcome::NameSimilar { contacts }
            } else {
                Outcome::NameExact { contacts }
            });
        }

        if let Some(hits) = self.numbers.take() {
            let contacts = match (hits.searched, hits.prefix) {
                (false, Some(phones)) => owning_contacts(source, phones)?,
                _ => hits.contacts,
            };
            self.push(Outcome::NumberContacts { contacts });
        }

        Ok(())
    }

    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }
}

// ==================== TABLE ====================

pub fn resolve_table<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
) -> Result<(), QueryError> {
    let table = match Table::from_alias(token) {
        Ok(table) => table,
        Err(QueryError::UnknownTable(name)) => {
            acc.push(Outcome::UnknownTable { name });
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    acc.push(table_dump(source, table)?);
    Ok(())
}

/// Every row of `table`, enriched
pub fn table_dump<S: QuerySource + ?Sized>(source: &S, table: Table) -> Result<Outcome, QueryError> {
    let mut rows = select(source, &Filter::all(table), MatchMode::Exact)?;
    enrich(source, table, &mut rows)?;
    Ok(Outcome::TableDump {
        rows: RowSet::new(table, rows),
    })
}

// ==================== GROUP ====================

pub fn resolve_group<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
) -> Result<(), QueryError> {
    let matched = execute(source, &Filter::all(Table::Group).with("name", token))?;

    let exact = matched.is_exact();
    let mut rows = matched.rows;
    let group = match (rows.len(), exact) {
        (0, _) => {
            acc.push(Outcome::NoGroup {
                query: token.to_string(),
            });
            return Ok(());
        }
        (1, true) => rows.remove(0),
        _ => {
            acc.push(Outcome::AmbiguousGroup {
                query: token.to_string(),
                candidates: RowSet::new(Table::Group, rows),
            });
            return Ok(());
        }
    };

    let name = group[col::GROUP_NAME].to_string();
    let mut contacts = match group[col::ID].as_integer() {
        Some(id) => select(
            source,
            &Filter::all(Table::Contact).with("group_id", id),
            MatchMode::Exact,
        )?,
        None => Vec::new(),
    };
    group_names(source, &mut contacts)?;

    acc.push(Outcome::GroupContacts {
        group: name,
        contacts: RowSet::new(Table::Contact, contacts),
    });
    Ok(())
}

// ==================== NUMBER ====================

pub fn resolve_number<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
) -> Result<(), QueryError> {
    if let Some(code) = token.strip_prefix('+') {
        return resolve_prefix(source, acc, token, code);
    }

    let Some(number) = parse_digits(token) else {
        acc.push(Outcome::NotANumber {
            token: token.to_string(),
        });
        return Ok(());
    };

    let mut phones = execute(source, &Filter::all(Table::PhoneNumber).with("number", number))?.rows;

    let hits = acc.numbers.get_or_insert_with(NumberHits::default);
    if let Some(scope) = &hits.prefix {
        let allowed: HashSet<i64> = ids(scope).collect();
        phones.retain(|row| row[col::ID].as_integer().is_some_and(|id| allowed.contains(&id)));
    }

    if phones.is_empty() {
        acc.numbers = None;
        acc.push(Outcome::NoNumberMatch {
            query: token.to_string(),
        });
        return Ok(());
    }

    hits.searched = true;
    for found in owning_contacts(source, phones)? {
        merge_contact(&mut hits.contacts, found);
    }
    Ok(())
}

fn resolve_prefix<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
    code: &str,
) -> Result<(), QueryError> {
    let Some(code) = parse_digits(code) else {
        acc.push(Outcome::NotANumber {
            token: token.to_string(),
        });
        return Ok(());
    };

    let matched = execute(source, &Filter::all(Table::Prefix).with("prefix", code.clone()))?;

    let exact = matched.is_exact();
    let mut candidates = matched.rows;
    let prefix_id = match (candidates.len(), exact) {
        (0, _) => {
            acc.numbers = None;
            acc.push(Outcome::NoNumberMatch {
                query: token.to_string(),
            });
            return Ok(());
        }
        (1, true) => candidates[0][col::ID].as_integer(),
        _ => {
            enrich(source, Table::Prefix, &mut candidates)?;
            acc.numbers = None;
            acc.push(Outcome::AmbiguousPrefix {
                query: token.to_string(),
                candidates: RowSet::new(Table::Prefix, candidates),
            });
            return Ok(());
        }
    };

    let phones = match prefix_id {
        Some(id) => select(
            source,
            &Filter::all(Table::PhoneNumber).with("prefix_id", id),
            MatchMode::Exact,
        )?,
        None => Vec::new(),
    };
    debug!(?code, phones = phones.len(), "prefix scope");

    acc.numbers.get_or_insert_with(NumberHits::default).prefix = Some(phones);
    Ok(())
}

/// Contacts owning `phones`, one entry per contact, numbers enriched.
/// Numbers without an existing owner are dropped.
fn owning_contacts<S: QuerySource + ?Sized>(
    source: &S,
    phones: Vec<Row>,
) -> Result<Vec<ContactNumbers>, QueryError> {
    let mut found: Vec<ContactNumbers> = Vec::new();

    for phone in phones {
        let Some(contact_id) = phone[col::PHONE_CONTACT_ID].as_integer() else {
            continue;
        };

        if let Some(entry) = found
            .iter_mut()
            .find(|c| c.contact[col::ID].as_integer() == Some(contact_id))
        {
            entry.numbers.push(phone);
            continue;
        }

        let rows = select(
            source,
            &Filter::all(Table::Contact).with("id", contact_id),
            MatchMode::Exact,
        )?;
        if let Some(contact) = rows.into_iter().next() {
            found.push(ContactNumbers {
                contact,
                numbers: vec![phone],
            });
        }
    }

    for entry in &mut found {
        group_names(source, std::slice::from_mut(&mut entry.contact))?;
        phone_numbers(source, &mut entry.numbers)?;
    }

    Ok(found)
}

fn merge_contact(contacts: &mut Vec<ContactNumbers>, found: ContactNumbers) {
    let id = found.contact[col::ID].as_integer();
    match contacts
        .iter_mut()
        .find(|c| c.contact[col::ID].as_integer() == id)
    {
        Some(existing) => {
            let known: HashSet<i64> = ids(&existing.numbers).collect();
            existing.numbers.extend(
                found
                    .numbers
                    .into_iter()
                    .filter(|n| n[col::ID].as_integer().is_some_and(|id| !known.contains(&id))),
            );
        }
        None => contacts.push(found),
    }
}

/// Digit strings too long for an integer column are still searched, as text
fn parse_digits(token: &str) -> Option<FilterValue> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(match token.parse::<i64>() {
        Ok(n) => FilterValue::Integer(n),
        Err(_) => FilterValue::Text(token.to_string()),
    })
}

// ==================== DATE ====================

pub fn resolve_date<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
) -> Result<(), QueryError> {
    let date = match parse_date(token) {
        Ok(date) => date,
        Err(outcome) => {
            acc.push(outcome);
            return Ok(());
        }
    };

    // Date predicates are identical in both modes, so one pass is enough.
    let mut contacts = select(
        source,
        &Filter::all(Table::Contact).with("date_of_birth", date.clone()),
        MatchMode::Exact,
    )?;
    group_names(source, &mut contacts)?;

    acc.push(Outcome::DateContacts {
        date,
        contacts: RowSet::new(Table::Contact, contacts),
    });
    Ok(())
}

/// Split `Y/M/D` into its three components, each possibly empty
pub fn parse_date(token: &str) -> Result<DateParts, Outcome> {
    let parts: Vec<&str> = token.split('/').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(Outcome::MalformedDate {
            token: token.to_string(),
        });
    };

    let date = DateParts::new(year, month, day);
    if date.is_empty() {
        return Err(Outcome::EmptyDate {
            token: token.to_string(),
        });
    }
    if [year, month, day]
        .iter()
        .any(|part| !part.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(Outcome::NonNumericDate {
            token: token.to_string(),
        });
    }

    Ok(date)
}

// ==================== NAME ====================

pub fn resolve_name<S: QuerySource + ?Sized>(
    source: &S,
    acc: &mut Accumulator,
    token: &str,
) -> Result<(), QueryError> {
    let filter = Filter::any(Table::Contact)
        .with("first_name", token)
        .with("last_name", token);
    let matched = execute(source, &filter)?;

    let hits = acc.names.get_or_insert_with(NameHits::default);
    hits.similar |= !matched.is_exact();

    let known: HashSet<i64> = ids(&hits.rows).collect();
    let mut fresh: Vec<Row> = matched
        .rows
        .into_iter()
        .filter(|row| row[col::ID].as_integer().is_some_and(|id| !known.contains(&id)))
        .collect();
    group_names(source, &mut fresh)?;
    hits.rows.extend(fresh);

    Ok(())
}

fn ids(rows: &[Row]) -> impl Iterator<Item = i64> + '_ {
    rows.iter().filter_map(|row| row[col::ID].as_integer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Cell, Contact, PhoneNumber, Prefix};
    use chrono::NaiveDate;

    struct Fixture {
        db: Database,
        jana: i64,
        petr: i64,
    }

    fn fixture() -> Fixture {
        let db = Database::open_memory().unwrap();
        let family = db.insert_group("family").unwrap();
        db.insert_group("friends").unwrap();
        let cz = db.insert_prefix(&Prefix::new(420, "Czechia")).unwrap();
        let sk = db.insert_prefix(&Prefix::new(421, "Slovakia")).unwrap();

        let mut jana = Contact::new("Jana", "Novakova");
        jana.group_id = Some(family);
        jana.date_of_birth = NaiveDate::from_ymd_opt(1990, 5, 15);
        let jana = db.insert_contact(&jana).unwrap();

        let mut petr = Contact::new("Petr", "Svoboda");
        petr.date_of_birth = NaiveDate::from_ymd_opt(1985, 11, 15);
        let petr = db.insert_contact(&petr).unwrap();

        db.insert_phone_number(&PhoneNumber::new(731123456, Some(jana)).with_prefix(cz))
            .unwrap();
        db.insert_phone_number(&PhoneNumber::new(731999000, Some(jana)).with_prefix(cz))
            .unwrap();
        db.insert_phone_number(&PhoneNumber::new(905123456, Some(petr)).with_prefix(sk))
            .unwrap();
        db.insert_phone_number(&PhoneNumber::new(731555555, None).with_prefix(cz))
            .unwrap();

        Fixture { db, jana, petr }
    }

    fn run(
        db: &Database,
        resolver: fn(&Database, &mut Accumulator, &str) -> Result<(), QueryError>,
        tokens: &[&str],
    ) -> Vec<Outcome> {
        let mut acc = Accumulator::new();
        for token in tokens {
            resolver(db, &mut acc, token).unwrap();
            if acc.halted() {
                break;
            }
        }
        acc.flush(db).unwrap();
        acc.into_outcomes()
    }

    fn contact_ids(contacts: &[ContactNumbers]) -> Vec<i64> {
        contacts
            .iter()
            .filter_map(|c| c.contact[col::ID].as_integer())
            .collect()
    }

    #[test]
    fn test_table_unknown_alias() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_table, &["people"]);
        assert_eq!(
            outcomes,
            vec![Outcome::UnknownTable {
                name: "people".into()
            }]
        );
    }

    #[test]
    fn test_table_dump_prefix_is_marked() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_table, &["p"]);
        let rows = outcomes[0].row_set().unwrap();
        assert_eq!(rows.table, Table::Prefix);
        assert_eq!(rows.rows[0][col::PREFIX_CODE], Cell::from("+420"));
    }

    #[test]
    fn test_group_exact() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_group, &["family"]);
        match &outcomes[0] {
            Outcome::GroupContacts { group, contacts } => {
                assert_eq!(group, "family");
                assert_eq!(contacts.ids(), vec![f.jana]);
                assert_eq!(contacts.rows[0][col::CONTACT_GROUP_ID], Cell::from("family"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_group_fuzzy_is_ambiguous() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_group, &["f"]);
        match &outcomes[0] {
            Outcome::AmbiguousGroup { query, candidates } => {
                assert_eq!(query, "f");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_group_missing() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_group, &["colleagues"]);
        assert_eq!(
            outcomes,
            vec![Outcome::NoGroup {
                query: "colleagues".into()
            }]
        );
    }

    #[test]
    fn test_number_exact_groups_numbers_by_contact() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["731123456"]);
        match &outcomes[0] {
            Outcome::NumberContacts { contacts } => {
                assert_eq!(contact_ids(contacts), vec![f.jana]);
                assert_eq!(contacts[0].numbers.len(), 1);
                assert_eq!(contacts[0].numbers[0][col::PHONE_PREFIX_ID], Cell::from("+420"));
                assert_eq!(contacts[0].numbers[0][col::PHONE_CONTACT_ID], Cell::from("Jana Novakova"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_number_fuzzy_dedupes_contacts() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["731"]);
        match &outcomes[0] {
            Outcome::NumberContacts { contacts } => {
                // the unowned 731555555 contributes nobody
                assert_eq!(contact_ids(contacts), vec![f.jana]);
                assert_eq!(contacts[0].numbers.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_number_intersects_with_prefix() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["+421", "123456"]);
        match &outcomes[0] {
            Outcome::NumberContacts { contacts } => {
                assert_eq!(contact_ids(contacts), vec![f.petr]);
                assert_eq!(contacts[0].numbers[0][col::PHONE_NUMBER], Cell::Integer(905123456));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_number_prefix_alone_lists_owners() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["+420"]);
        match &outcomes[0] {
            Outcome::NumberContacts { contacts } => {
                assert_eq!(contact_ids(contacts), vec![f.jana]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_number_prefix_excludes_everything() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["+421", "731123456"]);
        assert_eq!(
            outcomes,
            vec![Outcome::NoNumberMatch {
                query: "731123456".into()
            }]
        );
    }

    #[test]
    fn test_number_ambiguous_prefix() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["+42"]);
        match &outcomes[0] {
            Outcome::AmbiguousPrefix { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates.rows[0][col::PREFIX_CODE], Cell::from("+420"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_number_rejects_non_digits() {
        let f = fixture();
        for token in ["abc", "+", "+4x", "731-123"] {
            let outcomes = run(&f.db, resolve_number, &[token]);
            assert_eq!(
                outcomes,
                vec![Outcome::NotANumber {
                    token: token.into()
                }]
            );
        }
    }

    #[test]
    fn test_overlong_number_is_still_a_number() {
        let f = fixture();
        for token in ["99999999999999999999", "+99999999999999999999"] {
            let outcomes = run(&f.db, resolve_number, &[token]);
            assert_eq!(
                outcomes,
                vec![Outcome::NoNumberMatch {
                    query: token.into()
                }]
            );
        }
    }

    #[test]
    fn test_number_without_match() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_number, &["111"]);
        assert_eq!(
            outcomes,
            vec![Outcome::NoNumberMatch {
                query: "111".into()
            }]
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1990//").unwrap(), DateParts::new("1990", "", ""));
        assert_eq!(parse_date("/5/15").unwrap(), DateParts::new("", "5", "15"));
        assert!(matches!(parse_date("1990/5"), Err(Outcome::MalformedDate { .. })));
        assert!(matches!(parse_date("1/2/3/4"), Err(Outcome::MalformedDate { .. })));
        assert!(matches!(parse_date("//"), Err(Outcome::EmptyDate { .. })));
        assert!(matches!(parse_date("abc/1/1"), Err(Outcome::NonNumericDate { .. })));
        assert!(matches!(parse_date("1990/-5/"), Err(Outcome::NonNumericDate { .. })));
    }

    #[test]
    fn test_date_by_day_only() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_date, &["//15"]);
        match &outcomes[0] {
            Outcome::DateContacts { contacts, .. } => {
                assert_eq!(contacts.ids(), vec![f.jana, f.petr]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_date_month_is_padded() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_date, &["/5/"]);
        match &outcomes[0] {
            Outcome::DateContacts { contacts, .. } => {
                assert_eq!(contacts.ids(), vec![f.jana]);
                assert_eq!(contacts.rows[0][col::CONTACT_GROUP_ID], Cell::from("family"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_name_exact_and_union() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_name, &["Jana", "Svoboda", "Novakova"]);
        match &outcomes[0] {
            Outcome::NameExact { contacts } => {
                assert_eq!(contacts.ids(), vec![f.jana, f.petr]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_name_any_fuzzy_token_marks_similar() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_name, &["Jana", "svob"]);
        match &outcomes[0] {
            Outcome::NameSimilar { contacts } => {
                assert_eq!(contacts.ids(), vec![f.jana, f.petr]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_name_without_match_is_empty_similar() {
        let f = fixture();
        let outcomes = run(&f.db, resolve_name, &["Xaver"]);
        match &outcomes[0] {
            Outcome::NameSimilar { contacts } => assert!(contacts.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
