//! Error handling - RFC 7807 responses from workflow outcomes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use tribune_core::DomainError;
use tribune_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    BadGateway(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            // The detail carries the same literal text a rejected credential
            // produces; callers cannot tell the two apart.
            AppError::Forbidden(detail) => ErrorResponse::forbidden().with_detail(detail.clone()),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail.clone()),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail.clone()),
            AppError::BadGateway(detail) => {
                tracing::error!("Upstream failure: {}", detail);
                ErrorResponse::bad_gateway()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Workflow outcomes map one-to-one onto transport errors; repository error
/// text is forwarded as-is.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::NotFound => AppError::NotFound(err.to_string()),
            DomainError::Forbidden => AppError::Forbidden(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Repository(msg) => AppError::BadRequest(msg),
        }
    }
}
