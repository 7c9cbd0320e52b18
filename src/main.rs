use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing::warn;

use contactbook::cli::ui::{clear_screen, PipedReader, TerminalReader};
use contactbook::cli::{run_list, run_list_json, run_menu, Cli, Commands, Settings};
use contactbook::config::Config;
use contactbook::db::Database;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    contactbook::init_logging(cli.verbose);

    let config = Config::load();
    let path = config.database_path(cli.db.clone())?;
    let db = Database::open_at(&path)
        .with_context(|| format!("Cannot open database {}", path.display()))?;

    let settings = Settings {
        locale: config.locale(cli.lang.as_deref()),
        default_table: config.default_table(),
        styled: io::stdout().is_terminal(),
    };

    let mut out = io::stdout().lock();
    match cli.command {
        None => {
            if io::stdin().is_terminal() {
                if let Err(e) = clear_screen() {
                    warn!("Cannot clear screen: {:#}", e);
                }
                run_menu(&db, &settings, &mut TerminalReader, &mut out)?;
            } else {
                let mut reader = PipedReader::new(io::stdin().lock());
                run_menu(&db, &settings, &mut reader, &mut out)?;
            }
        }
        Some(Commands::List(args)) => {
            if args.json {
                run_list_json(&db, &settings, &args.tokens, &mut out)?;
            } else {
                run_list(&db, &settings, &args.tokens, &mut out)?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
