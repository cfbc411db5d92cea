//! HTTP mapping for application errors

use autoparts_core::{Error, ErrorCode};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// An `Error` rendered as an `ErrorReport` body
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// Status code for an error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    if code == ErrorCode::NotFound {
        StatusCode::NOT_FOUND
    } else if code.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, error = %self.0.message, "Request rejected");
        }
        (status, Json(self.0.to_report())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::ValidationError), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InvalidQuery), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Internal), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorCode::CatalogLoadError), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
