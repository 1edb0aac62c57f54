//! Errors of operations that validate input and then touch storage.

use super::error_code::ReqErrorCode;
use super::{StorageError, ValidationError};

/// Aggregates the subsystem errors a read-modify-write operation can hit.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ReqErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
