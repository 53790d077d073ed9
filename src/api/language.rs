//! Language switch resolver.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{parse_language, ApiResponse};
use crate::content::ContentService;
use crate::errors::AppError;
use crate::i18n::{get_canonical_key, get_localized_slug, is_route_key, localized_path, routes, Language};
use crate::pages::templates::article_path;
use crate::session::Session;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LanguageSwitchQuery {
    /// Path of the current page after the language segment, e.g. `contatti` or `blog/ciao-mondo`
    #[serde(default)]
    pub slug: String,
    pub language: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageSwitchResponse {
    pub url: String,
}

/// URL of the page at `slug` in `current`, translated to `target`.
///
/// Unknown pages map to the target language's home page.
pub async fn switch_url(
    content: &ContentService,
    slug: &str,
    current: Language,
    target: Language,
) -> Result<String, AppError> {
    let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();

    let url = match segments.as_slice() {
        [] => localized_path(routes::HOME, target),
        [page] => {
            let key = get_canonical_key(page);
            if is_route_key(&key) {
                localized_path(&key, target)
            } else {
                localized_path(routes::HOME, target)
            }
        }
        [section, post] if *section == get_localized_slug(routes::BLOG, current) => {
            match content.slug_in_language(post, current, target).await? {
                Some(translated) => article_path(target, &translated),
                None => localized_path(routes::BLOG, target),
            }
        }
        _ => localized_path(routes::HOME, target),
    };
    Ok(url)
}

/// GET /api/language-switch - Resolve the equivalent page in another language.
///
/// Also remembers the target language in the session cookie.
pub async fn language_switch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LanguageSwitchQuery>,
) -> Result<Response, AppError> {
    let current = parse_language(&params.language)?;
    let target = parse_language(&params.target)?;

    let url = switch_url(&state.content, &params.slug, current, target).await?;

    let session = Session {
        locale: Some(target),
        ..state.sessions.from_headers(&headers)
    };
    let cookie = state.sessions.set_cookie_header(&session)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::new(LanguageSwitchResponse { url }),
    )
        .into_response())
}
