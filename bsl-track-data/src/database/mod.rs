use thiserror::Error;

// Database modules
pub mod connection;
pub mod migrations;

pub use connection::{DatabaseConfig, DatabasePool};

/// Database error enum
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Migration error
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Generic(String),
}

impl From<String> for DatabaseError {
    fn from(error: String) -> Self {
        DatabaseError::Generic(error)
    }
}
