//! Search API endpoint.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{parse_language, success, ApiResult};
use crate::i18n::Language;
use crate::pages::templates::article_path;
use crate::search::MAX_OFFSET;
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    /// Defaults to the site's default language
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub post_id: String,
    pub title: String,
    pub url: String,
    pub score: f32,
}

/// Maximum number of search results allowed.
const MAX_SEARCH_LIMIT: usize = 100;

/// GET /api/search - Full-text search over published articles.
pub async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let language = match params.language.as_deref() {
        Some(code) => parse_language(code)?,
        None => Language::DEFAULT,
    };
    let limit = params.limit.min(MAX_SEARCH_LIMIT);

    let offset = params.offset.min(MAX_OFFSET);

    let page = state.search.search(&params.q, language, limit, offset)?;
    let results: Vec<SearchResultItem> = page
        .hits
        .into_iter()
        .map(|hit| SearchResultItem {
            url: article_path(language, &hit.slug),
            post_id: hit.post_id,
            title: hit.title,
            score: hit.score,
        })
        .collect();

    success(SearchResponse {
        results,
        total: page.total,
        limit,
        offset,
    })
}
