// ================================================================
// File: invite-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A generated code collided with one already in the pool.
    #[error("Duplicate invite code: {0}")]
    DuplicateCode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Storage-layer failures. These surface as internal errors and are never retried.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::DuplicateCode(_) | Error::Database(_) | Error::Migration(_)
        )
    }
}
