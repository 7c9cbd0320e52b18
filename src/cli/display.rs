use crossterm::style::Stylize;
use std::io::{self, Write};

use super::strings::{column_label, fill, outcome_text, ui, Locale, Ui};
use crate::models::{Cell, Row};
use crate::query::registry::col;
use crate::query::{ContactNumbers, Outcome, RowSet, Table};

const INDENT: &str = "      ";
const COLUMN_GAP: &str = "  ";

/// Renders outcomes as a heading plus an aligned table
pub struct Presenter {
    locale: Locale,
    styled: bool,
    max_cell: usize,
}

impl Presenter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            styled: false,
            max_cell: 30,
        }
    }

    /// Bold headings and column titles (for terminals)
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn render(&self, out: &mut dyn Write, outcome: &Outcome) -> io::Result<()> {
        let heading = self.heading(outcome);
        if outcome.is_valid() {
            writeln!(out, "\n{}{}", INDENT, self.emphasize(&heading))?;
        } else {
            writeln!(out, "{}{}", INDENT, heading)?;
            return Ok(());
        }

        match outcome {
            Outcome::NumberContacts { contacts } => self.number_table(out, contacts),
            _ => match outcome.row_set() {
                Some(rows) => self.row_table(out, rows),
                None => Ok(()),
            },
        }
    }

    /// Localized heading, with the query or token filled in
    pub fn heading(&self, outcome: &Outcome) -> String {
        let template = outcome_text(outcome.kind(), self.locale);
        match detail(outcome) {
            Some(value) => fill(template, &value),
            None => template.to_string(),
        }
    }

    fn row_table(&self, out: &mut dyn Write, rows: &RowSet) -> io::Result<()> {
        let headers: Vec<String> = rows
            .columns
            .iter()
            .map(|c| column_label(c, self.locale).to_string())
            .collect();
        let body: Vec<Vec<String>> = rows.rows.iter().map(|row| self.cells(row)).collect();
        self.table(out, &headers, &body)
    }

    fn number_table(&self, out: &mut dyn Write, contacts: &[ContactNumbers]) -> io::Result<()> {
        let mut headers: Vec<String> = Table::Contact
            .columns()
            .iter()
            .map(|c| column_label(c, self.locale).to_string())
            .collect();
        headers.push(column_label("number", self.locale).to_string());

        let body: Vec<Vec<String>> = contacts
            .iter()
            .map(|entry| {
                let mut cells = self.cells(&entry.contact);
                let numbers: Vec<String> = entry.numbers.iter().map(format_number).collect();
                cells.push(numbers.join(", "));
                cells
            })
            .collect();
        self.table(out, &headers, &body)
    }

    fn table(&self, out: &mut dyn Write, headers: &[String], body: &[Vec<String>]) -> io::Result<()> {
        if body.is_empty() {
            return writeln!(out, "{}", ui(Ui::NoRows, self.locale));
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_line = join_padded(headers, &widths);
        writeln!(out, "{}{}", INDENT, self.emphasize(&header_line))?;
        let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        writeln!(out, "{}{}", INDENT, "-".repeat(rule_width))?;
        for row in body {
            writeln!(out, "{}{}", INDENT, join_padded(row, &widths))?;
        }
        Ok(())
    }

    fn cells(&self, row: &Row) -> Vec<String> {
        row.iter().map(|cell| truncate(&cell.to_string(), self.max_cell)).collect()
    }

    fn emphasize(&self, text: &str) -> String {
        if self.styled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// The value shown in place of the heading placeholder
fn detail(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::GroupContacts { group, .. } => Some(group.clone()),
        Outcome::DateContacts { date, .. } => {
            Some(format!("{}/{}/{}", date.year, date.month, date.day))
        }
        Outcome::AmbiguousGroup { query, .. }
        | Outcome::AmbiguousPrefix { query, .. }
        | Outcome::NoGroup { query }
        | Outcome::NoNumberMatch { query } => Some(query.clone()),
        Outcome::UnknownFlag { flag } => Some(flag.clone()),
        Outcome::UnknownTable { name } => Some(name.clone()),
        Outcome::NotANumber { token }
        | Outcome::MalformedDate { token }
        | Outcome::EmptyDate { token }
        | Outcome::NonNumericDate { token } => Some(token.clone()),
        Outcome::MissingArgument { mode } => Some(mode.flag().to_string()),
        _ => None,
    }
}

/// "+420 731123456" from an enriched phone number row
fn format_number(row: &Row) -> String {
    let prefix = &row[col::PHONE_PREFIX_ID];
    let number = &row[col::PHONE_NUMBER];
    match prefix {
        Cell::Null => number.to_string(),
        _ => format!("{} {}", prefix, number),
    }
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept.trim_end())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DateParts, Mode};

    fn render(locale: Locale, outcome: &Outcome) -> String {
        let mut out = Vec::new();
        Presenter::new(locale).render(&mut out, outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn group_rows() -> RowSet {
        RowSet::new(
            Table::Group,
            vec![
                vec![Cell::Integer(1), Cell::from("family")],
                vec![Cell::Integer(2), Cell::from("friends")],
            ],
        )
    }

    #[test]
    fn test_table_is_aligned() {
        let text = render(
            Locale::En,
            &Outcome::TableDump { rows: group_rows() },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "      All groups");
        assert_eq!(lines[2], "      id  name");
        assert_eq!(lines[3], "      -----------");
        assert_eq!(lines[4], "      1   family");
        assert_eq!(lines[5], "      2   friends");
    }

    #[test]
    fn test_ambiguous_lists_candidates() {
        let text = render(
            Locale::En,
            &Outcome::AmbiguousGroup {
                query: "f".into(),
                candidates: group_rows(),
            },
        );
        assert!(text.contains("Group 'f' not found, did you mean:"));
        assert!(text.contains("friends"));
    }

    #[test]
    fn test_errors_are_one_line() {
        let text = render(
            Locale::Cz,
            &Outcome::MissingArgument { mode: Mode::Group },
        );
        assert_eq!(text, "      Přepínač '-g' potřebuje argument\n");
    }

    #[test]
    fn test_empty_result() {
        let text = render(
            Locale::En,
            &Outcome::DateContacts {
                date: DateParts::new("1990", "", ""),
                contacts: RowSet::new(Table::Contact, vec![]),
            },
        );
        assert!(text.contains("Contacts born on '1990//'"));
        assert!(text.contains("Nothing found."));
    }

    #[test]
    fn test_number_contacts_show_numbers() {
        let contact = vec![
            Cell::Integer(1),
            Cell::from("Jana"),
            Cell::from("Novakova"),
            Cell::Null,
            Cell::Null,
            Cell::Null,
            Cell::Null,
            Cell::Null,
        ];
        let numbers = vec![
            vec![Cell::Integer(1), Cell::from("+420"), Cell::Integer(731123456), Cell::from("Jana Novakova")],
            vec![Cell::Integer(2), Cell::Null, Cell::Integer(602000111), Cell::from("Jana Novakova")],
        ];
        let text = render(
            Locale::En,
            &Outcome::NumberContacts {
                contacts: vec![ContactNumbers { contact, numbers }],
            },
        );
        assert!(text.contains("+420 731123456, 602000111"));
        assert!(text.contains("number"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Václavské náměstí", 8), "Václavs…");
    }
}
