//! Token validation and the authenticated-caller extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

use tribune_core::ports::{AuthError, TokenClaims};

use crate::state::AppState;

/// Claims of the authenticated caller.
///
/// Use this in handlers to require a valid bearer token:
/// ```ignore
/// async fn protected_route(caller: Authenticated) -> impl Responder {
///     format!("Hello, user {}!", caller.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user_id: i64,
    pub login: String,
}

impl From<TokenClaims> for Authenticated {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            login: claims.login,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use tribune_shared::ErrorResponse;

        // One body for every token failure.
        actix_web::HttpResponse::build(self.status_code())
            .json(ErrorResponse::unauthorized().with_detail("Could not validate credentials"))
    }
}

impl FromRequest for Authenticated {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Get the token service from app data
        let state = match req.app_data::<actix_web::web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState not found in app data");
                return ready(Err(AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                ))));
            }
        };

        // Extract Bearer token from Authorization header
        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Err(AuthenticationError(AuthError::MissingAuth))),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => {
                return ready(Err(AuthenticationError(AuthError::InvalidToken(
                    "Invalid authorization header".to_string(),
                ))));
            }
        };

        // Parse "Bearer <token>"
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                return ready(Err(AuthenticationError(AuthError::InvalidToken(
                    "Expected Bearer token".to_string(),
                ))));
            }
        };

        // Validate token
        match state.tokens.validate_token(token) {
            Ok(claims) => ready(Ok(Authenticated::from(claims))),
            Err(e) => ready(Err(AuthenticationError(e))),
        }
    }
}
