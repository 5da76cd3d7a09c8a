use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ErrorBody;
use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error returned by handlers; renders as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) | ServiceError::Model(ModelError::Validation(m)) => Self::bad_request(m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            // store failures surface as 400; the cause is only distinguishable in logs
            ServiceError::Db(m) | ServiceError::Model(ModelError::Db(m)) => {
                error!(error = %m, "database operation failed");
                Self::bad_request(m)
            }
            ServiceError::Storage(m) => {
                error!(error = %m, "upload storage failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to store upload")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        let code = e.code();
        match e {
            AuthError::Validation(m) => Self::bad_request(m),
            AuthError::Conflict => Self::bad_request(message),
            AuthError::Unauthorized | AuthError::MissingToken => Self::new(StatusCode::UNAUTHORIZED, message),
            AuthError::InvalidToken => Self::new(StatusCode::FORBIDDEN, message),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, message),
            AuthError::Repository(m) => {
                error!(code, error = %m, "auth repository failed");
                Self::bad_request(m)
            }
            AuthError::HashError(m) | AuthError::TokenError(m) => {
                error!(code, error = %m, "auth internals failed");
                Self::internal()
            }
        }
    }
}
