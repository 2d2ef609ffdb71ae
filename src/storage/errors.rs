//! Record store error types
//!
//! Error codes:
//! - ECOACT_STORE_NOT_FOUND
//! - ECOACT_STORE_SQLITE
//! - ECOACT_STORE_POISONED

use thiserror::Error;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record carries this identifier
    #[error("Element {0} not found")]
    NotFound(i64),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A previous holder of the connection lock panicked
    #[error("Store connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "ECOACT_STORE_NOT_FOUND",
            StoreError::Sqlite(_) => "ECOACT_STORE_SQLITE",
            StoreError::Poisoned => "ECOACT_STORE_POISONED",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
