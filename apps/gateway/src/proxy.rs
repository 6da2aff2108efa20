//! Reverse-proxy fallback: unmatched paths are forwarded verbatim to the
//! identity service.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, http::header, web};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Forward the request to the identity service and relay its response.
pub async fn forward(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let target_url = match req.uri().query() {
        Some(query) => format!("{}{}?{}", state.identity_url, req.uri().path(), query),
        None => format!("{}{}", state.identity_url, req.uri().path()),
    };
    tracing::debug!(method = %req.method(), target = %target_url, "Forwarding to identity service");

    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let mut upstream = state.http.request(method, &target_url);
    for (name, value) in req.headers() {
        // The upstream client supplies its own host and content-length.
        if name != header::HOST && name != header::CONTENT_LENGTH {
            upstream = upstream.header(name.as_str(), value.as_bytes());
        }
    }

    let response = upstream
        .body(body.to_vec())
        .send()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let mut reply = HttpResponse::build(status);
    for (name, value) in response.headers() {
        // The body is relayed buffered, so the upstream framing headers do
        // not apply.
        if name != reqwest::header::TRANSFER_ENCODING && name != reqwest::header::CONTENT_LENGTH {
            reply.insert_header((name.as_str(), value.as_bytes()));
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    Ok(reply.body(bytes.to_vec()))
}
