use anyhow::Result;
use std::io::Write;

use crate::cli::display::Presenter;
use crate::cli::Settings;
use crate::db::Database;
use crate::query::{Engine, Outcome};

fn resolve<T: AsRef<str>>(db: &Database, settings: &Settings, tokens: &[T]) -> Result<Vec<Outcome>> {
    let outcomes = Engine::new(db)
        .with_default_table(settings.default_table)
        .resolve(tokens)?;
    Ok(outcomes)
}

/// Resolve `tokens` and draw every outcome
pub fn run_list<T: AsRef<str>>(
    db: &Database,
    settings: &Settings,
    tokens: &[T],
    out: &mut dyn Write,
) -> Result<()> {
    let outcomes = resolve(db, settings, tokens)?;
    let presenter = Presenter::new(settings.locale).styled(settings.styled);
    for outcome in &outcomes {
        presenter.render(out, outcome)?;
    }
    Ok(())
}

/// Resolve `tokens` and print the outcomes as a JSON array
pub fn run_list_json<T: AsRef<str>>(
    db: &Database,
    settings: &Settings,
    tokens: &[T],
    out: &mut dyn Write,
) -> Result<()> {
    let outcomes = resolve(db, settings, tokens)?;
    serde_json::to_writer_pretty(&mut *out, &outcomes)?;
    writeln!(out)?;
    Ok(())
}
