//! Domain error types.

use thiserror::Error;

/// Errors that can occur while validating input or constructing domain values.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request payload is malformed: missing, mistyped, or unexpected fields.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// An integer status code does not map to a known enumerator.
    #[error("Unknown {field} code: {code}")]
    UnknownCode { field: &'static str, code: i32 },
}
