//! Admin authentication with a pre-shared key.
//!
//! The key is accepted from the `x-api-key` header or as a bearer token and
//! compared in constant time.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the admin key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware guarding `/api/admin`. With no key configured every request passes.
pub async fn admin_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let matches = provided_key(request.headers()).map(|key| constant_time_compare(key, &expected));
    match matches {
        Some(true) => next.run(request).await,
        Some(false) => {
            tracing::warn!("Rejected admin request to {}", request.uri().path());
            AppError::Unauthorized("Invalid API key".to_string()).into_response()
        }
        None => AppError::Unauthorized("Missing API key".to_string()).into_response(),
    }
}

/// Key from `x-api-key`, else from `Authorization: Bearer`.
fn provided_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
