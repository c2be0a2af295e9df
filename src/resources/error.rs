//! Error type for resource operations.

use crate::model::FieldError;
use crate::storage::StorageError;
use thiserror::Error;

/// Outcome of a failed resource operation.
///
/// The HTTP layer maps these onto status codes: `NotFound` → 404, `BadRequest` → 400
/// with the message as the body's `error`, everything else → 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
