//! Configuration file support
//!
//! Loads configuration from .contactbook.toml in the current directory or
//! <config dir>/contactbook/config.toml. Command line flags win over both.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::strings::Locale;
use crate::db::Database;
use crate::query::Table;

const LOCAL_CONFIG: &str = ".contactbook.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database
    pub database: Option<PathBuf>,
    /// "cz" or "en"
    pub language: Option<String>,
    /// Table listed by a bare `l`
    pub default_table: Option<String>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .contactbook.toml in current directory
    /// 2. <config dir>/contactbook/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(Path::new(LOCAL_CONFIG)) {
            return config;
        }

        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("contactbook").join("config.toml");
            if let Some(config) = Self::load_from_path(&path) {
                return config;
            }
        }

        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn database_path(&self, cli_value: Option<PathBuf>) -> Result<PathBuf> {
        match cli_value.or_else(|| self.database.clone()) {
            Some(path) => Ok(path),
            None => Database::default_path(),
        }
    }

    /// CLI language, then config, then Czech
    pub fn locale(&self, cli_value: Option<&str>) -> Locale {
        cli_value
            .or(self.language.as_deref())
            .and_then(|s| {
                let locale = Locale::parse(s);
                if locale.is_none() {
                    warn!("Unknown language '{}', using default", s);
                }
                locale
            })
            .unwrap_or_default()
    }

    pub fn default_table(&self) -> Table {
        match self.default_table.as_deref().map(Table::from_alias) {
            Some(Ok(table)) => table,
            Some(Err(e)) => {
                warn!("{}, listing contacts by default", e);
                Table::Contact
            }
            None => Table::Contact,
        }
    }
}
