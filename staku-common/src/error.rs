//! Common error types for Staku

use thiserror::Error;

/// Common result type for Staku operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the storage and configuration layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing the root folder or database file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or holds an invalid value
    #[error("Configuration error: {0}")]
    Config(String),
}
