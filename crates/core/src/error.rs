//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Messages are meant to be shown to a coach verbatim, so they are phrased
/// for people rather than for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing required field or an invalid field combination.
    #[error("{0}")]
    Validation(String),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A resource referenced from the request body does not exist
    /// (e.g. the athlete an item is being assigned to).
    #[error("{0}")]
    MissingReference(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }
}
