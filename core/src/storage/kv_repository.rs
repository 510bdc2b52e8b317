use crate::models::{datetime_to_timestamp, timestamp_to_datetime};
use crate::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub struct KvRepository;

impl KvRepository {
    /// Get the value stored under a key
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Insert or overwrite the value under a key
    pub fn set(conn: &Connection, key: &str, value: &str, now: &DateTime<Utc>) -> Result<()> {
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, datetime_to_timestamp(now)],
        )?;
        Ok(())
    }

    /// When a key was last written
    pub fn updated_at(conn: &Connection, key: &str) -> Result<Option<DateTime<Utc>>> {
        let timestamp: Option<i64> = conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(timestamp.map(timestamp_to_datetime))
    }
}
