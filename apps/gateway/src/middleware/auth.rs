//! Bearer credential extraction.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

use tribune_core::ports::AuthError;

/// The raw bearer credential from the Authorization header.
///
/// Extraction only checks the header shape; verification happens inside the
/// workflow, which calls the identity service. A missing or malformed header
/// is rejected here without any upstream call.
///
/// Use this in handlers that require a credential:
/// ```ignore
/// async fn protected_route(token: BearerToken) -> impl Responder {
///     // token.0 is the opaque credential
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Error type for credential extraction failures.
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

        // One body for every extraction failure; the response does not say
        // what was wrong with the credential.
        actix_web::HttpResponse::build(self.status_code()).json(ErrorResponse::unauthorized())
    }
}

impl FromRequest for BearerToken {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
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
            Some(t) if !t.is_empty() => t,
            _ => {
                return ready(Err(AuthenticationError(AuthError::InvalidToken(
                    "Expected Bearer token".to_string(),
                ))));
            }
        };

        ready(Ok(BearerToken(token.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn extracts_the_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc123"))
            .to_http_request();

        let token = BearerToken::from_request(&req, &mut Payload::None)
            .into_inner()
            .unwrap();

        assert_eq!(token.0, "abc123");
    }

    #[test]
    fn a_missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();

        let result = BearerToken::from_request(&req, &mut Payload::None).into_inner();

        assert!(matches!(
            result,
            Err(AuthenticationError(AuthError::MissingAuth))
        ));
    }

    #[test]
    fn a_non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc123"))
            .to_http_request();

        let result = BearerToken::from_request(&req, &mut Payload::None).into_inner();

        assert!(result.is_err());
    }

    #[test]
    fn an_empty_token_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();

        let result = BearerToken::from_request(&req, &mut Payload::None).into_inner();

        assert!(result.is_err());
    }
}
