use std::time::Duration;

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{StorageBackend, StorageError, StudentRecord};

/// Storage slot for the serialized roster snapshot.
const ROSTER_KEY: &str = "classtrack.roster";

/// Key/value store over a local `SQLite` file.
///
/// Holds the whole roster as one JSON value under a fixed key. This is the
/// local stand-in for a host-provided store when none is injected.
#[derive(Clone)]
pub struct LocalKeyValueBackend {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl LocalKeyValueBackend {
    /// Connect to `SQLite` using the given URL.
    ///
    /// The pool is capped at one connection: the engine has a single writer,
    /// and overlapping detached saves serialize at the pool.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the key/value table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the migration query fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Connect and migrate in one step.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migration fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let backend = Self::connect(database_url).await?;
        backend.migrate().await?;
        Ok(backend)
    }
}

#[async_trait]
impl StorageBackend for LocalKeyValueBackend {
    async fn save_roster(&self, roster: &[StudentRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(roster)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(ROSTER_KEY)
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn load_roster(&self) -> Result<Option<Vec<StudentRecord>>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?1")
            .bind(ROSTER_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some((value,)) => {
                let records = serde_json::from_str(&value)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(records))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocalKeyValueBackend>();
    }
}
