use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::errors::StorageError;

/// Handle to the SQLite database shared by every store.
#[derive(Clone, Debug)]
pub struct DataStore {
    pool: SqlitePool,
}

impl DataStore {
    /// Connect to the database at `url`, creating the file if needed.
    ///
    /// In-memory databases live only as long as their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        if !url.starts_with("sqlite:") {
            return Err(StorageError::Config(format!(
                "{url}: only sqlite connection strings are supported"
            )));
        }

        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Config(format!("{url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_opts = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_opts.connect_with(opts).await?;

        tracing::info!(url, in_memory, "Connected to database");
        Ok(Self { pool })
    }

    /// Fresh private in-memory database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::connect("sqlite::memory:").await
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
