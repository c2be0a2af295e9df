//! HTTP mapping for [`ApiError`].

use crate::resources::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::NotFound => "Not Found".to_string(),
            ApiError::BadRequest(msg) => {
                debug!(error = %msg, "Request rejected");
                msg.clone()
            }
            other => {
                error!(error = %other, "Request failed");
                "Internal Server Error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Fallback for every unmatched path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
