pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod query;

pub use db::Database;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr logger. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "contactbook=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
