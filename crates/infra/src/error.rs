//! Service-level error taxonomy.

use thiserror::Error;

use trackhub_core::DomainError;

use crate::store::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service operation.
///
/// `Validation`, `NotFound` and `MissingReference` are raised before any
/// write and carry a message fit for display. `Dependency` means the store
/// failed; earlier writes of the same operation are not rolled back.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A resource referenced by the request does not exist.
    #[error("{0}")]
    MissingReference(String),

    #[error("document store failure: {0}")]
    Dependency(#[from] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MissingReference(_))
    }
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::NotFound(msg) => ServiceError::NotFound(msg),
            DomainError::MissingReference(msg) => ServiceError::MissingReference(msg),
        }
    }
}
