use super::{Connection, Database, KvRepository, StorageBackend};
use crate::Result;
use chrono::Utc;
use std::path::Path;

/// Storage slots kept in the `kv` table of a sqlite database.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open the database at `path`, creating it and its schema if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Database::new(path).get_or_create()?;
        Ok(Self { conn })
    }

    /// Wrap an already initialized connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StorageBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        KvRepository::get(&self.conn, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        KvRepository::set(&self.conn, key, value, &Utc::now())
    }
}
