//! JSON API module.
//!
//! Public endpoints used by the site's pages, plus the PSK-protected admin
//! endpoints under `/api/admin`.

mod contact;
mod experience;
mod gallery;
mod language;
mod posts;
mod search;
mod theme;
mod users;

pub use contact::*;
pub use experience::*;
pub use gallery::*;
pub use language::*;
pub use posts::*;
pub use search::*;
pub use theme::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Parse a language code from a request, rejecting unsupported ones.
fn parse_language(code: &str) -> Result<crate::i18n::Language, AppError> {
    crate::i18n::Language::parse(code)
        .ok_or_else(|| AppError::BadRequest(format!("Unsupported language: {}", code)))
}
