use async_trait::async_trait;
use tokio_rusqlite::Connection;

use havo_core::account::{AccountError, ApiKeyStore, Result};

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Account store backed by the `api_keys` table of a SQLite database.
pub struct SqliteApiKeyStore {
    conn: Connection,
}

impl SqliteApiKeyStore {
    /// Opens a file-based database, creating the file and table if needed.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| AccountError::Store(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens an in-memory database. Data is lost when the store is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| AccountError::Store(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    /// Registers `api_key` for `user_id`. Existing keys are left untouched.
    pub async fn insert_api_key(&self, user_id: i64, api_key: &str) -> Result<()> {
        let api_key = api_key.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_API_KEY, rusqlite::params![user_id, api_key])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl ApiKeyStore for SqliteApiKeyStore {
    async fn check_api_key(&self, api_key: &str) -> Result<bool> {
        let api_key = api_key.to_string();

        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(schema::COUNT_API_KEY, [&api_key], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        if count > 0 {
            Ok(true)
        } else {
            Err(AccountError::ApiKeyNotFound)
        }
    }
}
