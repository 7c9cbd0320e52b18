//! Mode Classifier
//!
//! Walks the argument tokens left to right. A token starting with `-` selects
//! a mode; anything else is an argument for the current mode. Tokens before
//! the first flag are name searches.

use serde::Serialize;
use tracing::debug;

use super::error::QueryError;
use super::executor::QuerySource;
use super::outcome::Outcome;
use super::registry::Table;
use super::resolvers::{
    resolve_date, resolve_group, resolve_name, resolve_number, resolve_table, table_dump,
    Accumulator,
};

const FLAG_MARKER: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Table,
    Group,
    Number,
    Date,
    Name,
}

impl Mode {
    /// Mode selected by a flag token, if it is one we know
    pub fn from_flag(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "-t" | "--table" => Some(Self::Table),
            "-g" | "--group" => Some(Self::Group),
            "-n" | "--number" => Some(Self::Number),
            "-d" | "--date" => Some(Self::Date),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::Table => "-t",
            Self::Group => "-g",
            Self::Number => "-n",
            Self::Date => "-d",
            Self::Name => "",
        }
    }
}

/// Resolves a token stream against a store
pub struct Engine<'a, S: QuerySource + ?Sized> {
    source: &'a S,
    default_table: Table,
}

impl<'a, S: QuerySource + ?Sized> Engine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            default_table: Table::Contact,
        }
    }

    /// Table dumped when the command has no arguments
    pub fn with_default_table(mut self, table: Table) -> Self {
        self.default_table = table;
        self
    }

    /// Classify `tokens` and run the resolvers they select.
    ///
    /// Returns one outcome per completed segment. The last outcome is the
    /// first non-success, if any.
    pub fn resolve<T: AsRef<str>>(&self, tokens: &[T]) -> Result<Vec<Outcome>, QueryError> {
        if tokens.is_empty() {
            return Ok(vec![table_dump(self.source, self.default_table)?]);
        }

        let mut acc = Accumulator::new();
        // None until the first flag; plain tokens before it are names
        let mut state: Option<Mode> = None;
        let mut has_argument = false;

        for token in tokens {
            let token = token.as_ref();

            if token.starts_with(FLAG_MARKER) {
                if let Some(mode) = state.filter(|_| !has_argument) {
                    acc.push(Outcome::MissingArgument { mode });
                    break;
                }
                acc.flush(self.source)?;

                let Some(mode) = Mode::from_flag(token) else {
                    acc.push(Outcome::UnknownFlag {
                        flag: token.to_string(),
                    });
                    break;
                };
                debug!(from = ?state, to = ?mode, "mode transition");
                state = Some(mode);
                has_argument = false;
                continue;
            }

            has_argument = true;
            let mode = state.unwrap_or(Mode::Name);
            match mode {
                Mode::Table => resolve_table(self.source, &mut acc, token)?,
                Mode::Group => resolve_group(self.source, &mut acc, token)?,
                Mode::Number => resolve_number(self.source, &mut acc, token)?,
                Mode::Date => resolve_date(self.source, &mut acc, token)?,
                Mode::Name => resolve_name(self.source, &mut acc, token)?,
            }

            if acc.halted() {
                return Ok(acc.into_outcomes());
            }
        }

        if !acc.halted() {
            match state {
                Some(mode) if !has_argument => acc.push(Outcome::MissingArgument { mode }),
                _ => acc.flush(self.source)?,
            }
        }

        Ok(acc.into_outcomes())
    }
}
