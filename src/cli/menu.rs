//! Command loop for contactbook
//!
//! Reads one line at a time: the first word picks a command, the rest are
//! its tokens. Storage errors are reported and the loop keeps going.

use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};

use crate::cli::list::run_list;
use crate::cli::strings::{fill, ui, Ui};
use crate::cli::ui::LineReader;
use crate::cli::Settings;
use crate::db::Database;

/// Commands with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    List,
    Insert,
    Update,
    Delete,
    Help,
}

impl Command {
    const ALL: &'static [Command] = &[
        Command::Quit,
        Command::List,
        Command::Insert,
        Command::Update,
        Command::Delete,
        Command::Help,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Command::Quit => &["q", "quit", "exit"],
            Command::List => &["l", "list"],
            Command::Insert => &["i", "insert"],
            Command::Update => &["u", "update"],
            Command::Delete => &["d", "delete"],
            Command::Help => &["h", "help"],
        }
    }

    pub fn parse(word: &str) -> Option<Command> {
        let word = word.to_lowercase();
        Command::ALL
            .iter()
            .find(|cmd| cmd.aliases().contains(&word.as_str()))
            .copied()
    }
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command, Vec<String>),
    Unknown(String),
    Blank,
}

pub fn parse_line(line: &str) -> Input {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Input::Blank;
    };
    match Command::parse(first) {
        Some(cmd) => Input::Command(cmd, words.map(str::to_string).collect()),
        None => Input::Unknown(first.to_string()),
    }
}

/// Run the command loop until `q` or end of input
pub fn run_menu(
    db: &Database,
    settings: &Settings,
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<()> {
    let locale = settings.locale;
    writeln!(out, "{}", ui(Ui::Help, locale))?;

    loop {
        let Some(line) = reader.read_line(ui(Ui::Prompt, locale))? else {
            return Ok(());
        };

        match parse_line(&line) {
            Input::Blank => continue,
            Input::Unknown(word) => {
                writeln!(out, "{}", fill(ui(Ui::WrongCommand, locale), &word))?;
            }
            Input::Command(cmd, tokens) => {
                debug!(?cmd, ?tokens, "command");
                match execute_command(db, settings, cmd, &tokens, out) {
                    Ok(true) => return Ok(()),
                    Ok(false) => {}
                    Err(e) => {
                        warn!("{:#}", e);
                        writeln!(out, "{}", fill(ui(Ui::Error, locale), &e.to_string()))?;
                    }
                }
            }
        }
        out.flush()?;
    }
}

/// Execute a command, catching all errors
/// Returns Ok(true) if the user wants to quit
fn execute_command(
    db: &Database,
    settings: &Settings,
    cmd: Command,
    tokens: &[String],
    out: &mut dyn Write,
) -> Result<bool> {
    let locale = settings.locale;
    match cmd {
        Command::Quit => Ok(true),
        Command::List => run_list(db, settings, tokens, out).map(|_| false),
        Command::Help => {
            writeln!(out, "{}", ui(Ui::Help, locale))?;
            Ok(false)
        }
        Command::Insert | Command::Update | Command::Delete => {
            let name = cmd.aliases()[1];
            writeln!(out, "{}", fill(ui(Ui::NotAvailable, locale), name))?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::strings::Locale;
    use crate::cli::ui::PipedReader;
    use crate::models::Contact;
    use crate::query::Table;
    use std::io::Cursor;

    fn settings() -> Settings {
        Settings {
            locale: Locale::En,
            default_table: Table::Contact,
            styled: false,
        }
    }

    fn session(db: &Database, input: &str) -> String {
        let mut reader = PipedReader::new(Cursor::new(input.to_string()));
        let mut out = Vec::new();
        run_menu(db, &settings(), &mut reader, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("L"), Some(Command::List));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("x"), None);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("l -n  +420 731"),
            Input::Command(
                Command::List,
                vec!["-n".into(), "+420".into(), "731".into()]
            )
        );
        assert_eq!(parse_line("   "), Input::Blank);
        assert_eq!(parse_line("zz top"), Input::Unknown("zz".into()));
    }

    #[test]
    fn test_session_lists_and_quits() {
        let db = Database::open_memory().unwrap();
        db.insert_contact(&Contact::new("Jana", "Novakova")).unwrap();

        let text = session(&db, "l Jana\nq\nl petr\n");
        assert!(text.starts_with("-----"));
        assert!(text.contains("Contacts with matching name"));
        assert!(text.contains("Novakova"));
        // nothing runs after quit
        assert_eq!(text.matches("Contacts with").count(), 1);
    }

    #[test]
    fn test_session_lowercase_name_is_similar() {
        let db = Database::open_memory().unwrap();
        db.insert_contact(&Contact::new("Jana", "Novakova")).unwrap();

        let text = session(&db, "l jana\n");
        assert!(text.contains("Contacts with similar name"));
        assert!(text.contains("Novakova"));
    }

    #[test]
    fn test_session_reports_unknown_and_unavailable() {
        let db = Database::open_memory().unwrap();
        let text = session(&db, "x\ni\n\nh\n");
        assert!(text.contains("Command 'x' does not exist!"));
        assert!(text.contains("Command 'insert' is not available yet."));
        assert_eq!(text.matches("show this table").count(), 2);
    }

    #[test]
    fn test_session_ends_at_end_of_input() {
        let db = Database::open_memory().unwrap();
        let text = session(&db, "l -t g");
        assert!(text.contains("All groups"));
        assert!(text.contains("Nothing found."));
    }
}
