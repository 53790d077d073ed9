//! Theme preference endpoint.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::ApiResponse;
use crate::errors::AppError;
use crate::i18n::Language;
use crate::session::{Session, Theme};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
    #[serde(default)]
    pub locale: Option<Language>,
}

/// POST /api/theme - Store the theme (and optionally locale) in the session cookie.
pub async fn set_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ThemeRequest>,
) -> Result<Response, AppError> {
    let current = state.sessions.from_headers(&headers);
    let session = Session {
        theme: Some(request.theme),
        locale: request.locale.or(current.locale),
    };
    let cookie = state.sessions.set_cookie_header(&session)?;

    tracing::debug!("Theme set to {}", request.theme.as_str());
    Ok(([(header::SET_COOKIE, cookie)], ApiResponse::new(session)).into_response())
}
