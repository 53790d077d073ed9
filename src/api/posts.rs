//! Admin post endpoints. Every write re-indexes the post for search.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{parse_language, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    validate_slug, CreatePostRequest, PostWithTranslations, UpsertTranslationRequest,
};
use crate::AppState;

/// Load a post with its translations and push it to the search index.
async fn reindex(state: &AppState, post_id: &str) -> Result<PostWithTranslations, AppError> {
    let post = state
        .repo
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;
    let entry = PostWithTranslations {
        translations: state.repo.list_translations(&post.id).await?,
        post,
    };
    state.search.index_post(&entry).await?;
    Ok(entry)
}

/// GET /api/admin/posts - All posts in every status.
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<PostWithTranslations>> {
    success(state.repo.list_posts().await?)
}

/// POST /api/admin/posts - Create a post without translations.
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<PostWithTranslations> {
    validate_slug(&request.slug).map_err(AppError::Validation)?;
    if request.read_time_minutes.is_some_and(|m| m < 0) {
        return Err(AppError::Validation("Read time cannot be negative".to_string()));
    }

    let post = state.repo.create_post(&request).await?;
    tracing::info!("Created post {} ({})", post.slug, post.status.as_str());
    success(reindex(&state, &post.id).await?)
}

/// PUT /api/admin/posts/{id}/translations/{language} - Create or replace a translation.
pub async fn upsert_translation(
    State(state): State<AppState>,
    Path((id, language)): Path<(String, String)>,
    Json(request): Json<UpsertTranslationRequest>,
) -> ApiResult<PostWithTranslations> {
    let language = parse_language(&language)?;
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if let Some(slug) = request.localized_slug.as_deref() {
        validate_slug(slug).map_err(AppError::Validation)?;
    }

    state.repo.upsert_translation(&id, language, &request).await?;
    tracing::info!("Saved {} translation of post {}", language, id);
    success(reindex(&state, &id).await?)
}
