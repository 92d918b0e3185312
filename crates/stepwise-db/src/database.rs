//! Database connection and table management.

use crate::error::Result;
use crate::schema;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), max_connections: 5 }
    }

    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n.max(1);
        self
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    url: String,
}

impl Database {
    /// Open (creating if needed) the database described by `options`.
    pub async fn connect(options: &DatabaseOptions) -> Result<Self> {
        let connect_opts = SqliteConnectOptions::from_str(&options.url)?.create_if_missing(true);

        let pool = if options.is_in_memory() {
            // Every SQLite memory connection is its own database, so pin
            // exactly one and never let the pool recycle it.
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(connect_opts)
                .await?
        } else {
            if let Some(parent) = database_file(&options.url).as_deref().and_then(Path::parent) {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            SqlitePoolOptions::new()
                .max_connections(options.max_connections)
                .connect_with(connect_opts)
                .await?
        };

        debug!("Connected to {}", options.url);
        Ok(Self { pool, url: options.url.clone() })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create all tables if they don't exist.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(schema::CREATE_SOLUTIONS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Check if a table exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}


/// Filesystem path of a `sqlite:` url, without query parameters.
fn database_file(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    (!path.is_empty()).then(|| PathBuf::from(path))
}
