use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod discounts;
pub mod products;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcomes surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,
    /// The request payload was rejected at the boundary.
    #[error("{0}")]
    Form(String),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
    /// Stored data violates an invariant, e.g. a coupon percent outside [0, 100).
    #[error("data integrity fault: {0}")]
    DataIntegrity(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::InvalidData(message) => ServiceError::DataIntegrity(message),
            other => ServiceError::StoreUnavailable(other.to_string()),
        }
    }
}
