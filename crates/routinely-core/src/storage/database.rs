//! SQLite-backed key-value storage.
//!
//! The routine snapshot is a single JSON document under one key, so the
//! schema is just a `kv` table.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::snapshot::{PersistenceGateway, SNAPSHOT_KEY};
use crate::error::PersistenceError;

/// SQLite database holding the key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/routinely.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, PersistenceError> {
        Self::open_at(data_dir()?.join("routinely.db"))
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    #[cfg(test)]
    fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Stores the snapshot document in the [`SNAPSHOT_KEY`] kv row.
pub struct KvGateway {
    db: Database,
}

impl KvGateway {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PersistenceGateway for KvGateway {
    fn read_document(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.db.kv_get(SNAPSHOT_KEY)?)
    }

    fn write_document(&mut self, document: &str) -> Result<(), PersistenceError> {
        Ok(self.db.kv_set(SNAPSHOT_KEY, document)?)
    }
}
