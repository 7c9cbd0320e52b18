use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod display;
pub mod list;
pub mod menu;
pub mod strings;
pub mod ui;

pub use display::Presenter;
pub use list::{run_list, run_list_json};
pub use menu::run_menu;

use crate::query::Table;
use strings::Locale;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Contact book with a terse query language")]
#[command(version)]
pub struct Cli {
    /// SQLite database file (default: <config dir>/contactbook/contacts.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Message language: cz or en
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Log query activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one query and exit, e.g. `list -n +420 731`
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Print outcomes as JSON
    #[arg(long)]
    pub json: bool,

    /// Query tokens: names, or -t/-g/-n/-d followed by arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// Resolved presentation settings shared by the loop and one-shot commands
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub locale: Locale,
    pub default_table: Table,
    pub styled: bool,
}
