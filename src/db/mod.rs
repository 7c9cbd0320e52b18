use anyhow::Result;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::{Cell, Row};

mod records;
mod schema;

pub use schema::SCHEMA_VERSION;

/// SQL function lowering text with full Unicode case rules (`LOWER` only folds ASCII)
pub const LOWER_FN: &str = "unicode_lower";

/// Owns the single SQLite connection for the lifetime of the process.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database file at `path`
    pub fn open_at(path: &Path) -> Result<Self> {
        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "opening contact database");
        let conn = Connection::open(path)?;
        Self::prepare(&conn)?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(&conn)?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Per-connection setup: dangling references are allowed, fuzzy search needs `LOWER_FN`
    fn prepare(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        conn.create_scalar_function(
            LOWER_FN,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
        )?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("contactbook").join("contacts.db"))
    }

    /// Run a read query and return every row as untyped cells.
    pub fn run_query(&self, sql: &str, params: &[Value]) -> rusqlite::Result<Vec<Row>> {
        debug!(sql, params = params.len(), "run_query");
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();

        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Cell::from))
                    .collect::<rusqlite::Result<Row>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn migrate(&self) -> Result<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            // Run migration in a transaction for atomicity
            self.conn
                .execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", schema::SCHEMA_V1))?;
            self.set_schema_version(SCHEMA_VERSION)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let result: Result<i32, _> =
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(rusqlite::Error::SqliteFailure(err, msg)) => {
                // "no such table" is error code 1 (SQLITE_ERROR)
                if err.code == rusqlite::ErrorCode::Unknown
                    && msg.as_ref().is_some_and(|m| m.contains("no such table"))
                {
                    Ok(0)
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_schema_version(&self, version: i32) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
            [version],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.get_schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_foreign_keys_are_not_enforced() {
        let db = Database::open_memory().unwrap();
        let rows = db.run_query("PRAGMA foreign_keys", &[]).unwrap();
        assert_eq!(rows, vec![vec![Cell::Integer(0)]]);
    }

    #[test]
    fn test_lower_fn_folds_unicode() {
        let db = Database::open_memory().unwrap();
        let rows = db
            .run_query(
                &format!("SELECT {}(?), {}(NULL)", LOWER_FN, LOWER_FN),
                &[Value::Text("ŠÁRKA Čermáková".into())],
            )
            .unwrap();
        assert_eq!(rows, vec![vec![Cell::from("šárka čermáková"), Cell::Null]]);
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::open_memory().unwrap();

        let tables: Vec<String> = db
            .run_query(
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
                &[],
            )
            .unwrap()
            .into_iter()
            .filter_map(|row| row[0].as_text().map(str::to_string))
            .collect();

        assert!(tables.contains(&"contact".to_string()));
        assert!(tables.contains(&"contact_group".to_string()));
        assert!(tables.contains(&"prefix".to_string()));
        assert!(tables.contains(&"phone_number".to_string()));
    }

    #[test]
    fn test_open_at_creates_parent_dirs_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.insert_group("family").unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get_schema_version().unwrap(), SCHEMA_VERSION);
        let rows = db.run_query("SELECT name FROM contact_group", &[]).unwrap();
        assert_eq!(rows, vec![vec![Cell::from("family")]]);
    }

    #[test]
    fn test_run_query_binds_params() {
        let db = Database::open_memory().unwrap();
        db.insert_group("family").unwrap();
        db.insert_group("work").unwrap();

        let rows = db
            .run_query(
                "SELECT id, name FROM contact_group WHERE name = ?",
                &[Value::Text("work".into())],
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], Cell::from("work"));
    }
}
