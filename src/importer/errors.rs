//! Bulk import error types

use std::io;

use thiserror::Error;

use crate::schema::FieldError;
use crate::storage::StoreError;

/// Bulk import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Dataset file could not be read
    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),

    /// A line (1-based) is not valid JSON
    #[error("Malformed JSON at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Delimited text could not be read (line is 1-based, 0 when unknown)
    #[error("Malformed CSV at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// The dataset is not a sequence of row objects
    #[error("Dataset is not tabular: {0}")]
    NotTabular(String),

    /// A row (1-based) could not be mapped onto the field table
    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: FieldError,
    },

    /// The batch insert failed; nothing was committed
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::Io(_) => "ECOACT_IMPORT_IO_ERROR",
            ImportError::Parse { .. } => "ECOACT_IMPORT_PARSE_ERROR",
            ImportError::Csv { .. } => "ECOACT_IMPORT_CSV_ERROR",
            ImportError::NotTabular(_) => "ECOACT_IMPORT_NOT_TABULAR",
            ImportError::Row { .. } => "ECOACT_IMPORT_ROW_INVALID",
            ImportError::Store(_) => "ECOACT_IMPORT_STORE_FAILED",
        }
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
