//! Field error types

use thiserror::Error;

/// Errors raised while reading or assigning record fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Name is not part of the field table
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Value cannot be stored in the field's column kind
    #[error("Field '{field}' expects a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}
