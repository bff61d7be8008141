//! Database connection module for the BSL Track application
//!
//! Provides an SQLite connection pool that runs the schema migrations once
//! at construction time. The pool is created at startup and handed to the
//! repository explicitly; there is no process-global state.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::info;

use super::migrations;
use super::DatabaseError;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a database configuration from environment variables,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        Self {
            max_connections,
            timeout_seconds,
        }
    }
}

/// SQLite connection pool shared by the repository
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl DatabasePool {
    /// Open a file-backed database, creating the parent directory if needed,
    /// and run the schema migrations
    pub fn open(path: &str, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Initializing SQLite database at: {}", path);

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating data directory: {:?}", parent);
                fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Generic(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

        let pool = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.timeout_seconds))
            .build(manager)?;

        let db = Self {
            pool: Arc::new(pool),
        };
        db.run_migrations()?;

        info!("SQLite connection pool created successfully");
        Ok(db)
    }

    /// Open an in-memory database and run the schema migrations
    ///
    /// The pool is capped at a single connection because every pooled
    /// `:memory:` connection would otherwise see its own empty database.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let manager = SqliteConnectionManager::memory();

        let pool = r2d2::Pool::builder().max_size(1).build(manager)?;

        let db = Self {
            pool: Arc::new(pool),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get a connection from the pool
    pub fn get(&self) -> Result<PooledConnection<SqliteConnectionManager>, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations");

        let conn = self.get()?;
        migrations::run(&conn)?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}
