//! JSON error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::content::StoreError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
}

/// An error returned to API clients as `{"message": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach validation details
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// A request body that failed to deserialize
    pub fn invalid_body(rejection: JsonRejection, message: &str) -> Self {
        Self::bad_request(message).with_errors(Value::Array(vec![Value::String(
            rejection.body_text(),
        )]))
    }

    /// A store failure during a mutation
    ///
    /// Slugs that cannot become file names are the client's fault; anything
    /// else is logged and reported as a server error.
    pub fn from_store(err: StoreError, invalid: &str, failed: &str) -> Self {
        match err {
            StoreError::InvalidSlug(_) => Self::bad_request(invalid)
                .with_errors(Value::Array(vec![Value::String(err.to_string())])),
            _ => {
                tracing::error!("{}: {}", failed, err);
                Self::internal(failed)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let invalid = ApiError::from_store(
            StoreError::InvalidSlug("a/b".to_string()),
            "Invalid post data",
            "Failed to create post",
        );
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert!(invalid.errors.is_some());

        let io = ApiError::from_store(
            StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
            "Invalid post data",
            "Failed to create post",
        );
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.message, "Failed to create post");
    }
}
