//! Admin image gallery backed by the uploads directory.

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];

#[derive(Debug, Serialize)]
pub struct GalleryImage {
    pub name: String,
    pub url: String,
    pub size: u64,
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

fn is_image(name: &str) -> bool {
    extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Check that `name` is a plain image file name that stays inside the uploads directory.
pub fn validate_image_name(name: &str) -> Result<(), AppError> {
    let plain = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !plain {
        return Err(AppError::Validation(format!("Invalid file name: {}", name)));
    }
    if !is_image(name) {
        return Err(AppError::Validation(format!(
            "Unsupported image type; expected one of {}",
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// GET /api/admin/gallery - List uploaded images by name.
pub async fn list_images(State(state): State<AppState>) -> ApiResult<Vec<GalleryImage>> {
    let mut images = Vec::new();
    let mut entries = match tokio::fs::read_dir(&state.config.uploads_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return success(images),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !metadata.is_file() || !is_image(&name) {
            continue;
        }
        images.push(GalleryImage {
            url: format!("/uploads/{}", name),
            name,
            size: metadata.len(),
        });
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    success(images)
}

/// PUT /api/admin/gallery/{name} - Upload an image, replacing any with the same name.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<GalleryImage> {
    validate_image_name(&name)?;
    if body.is_empty() {
        return Err(AppError::Validation("Image body is empty".to_string()));
    }

    tokio::fs::create_dir_all(&state.config.uploads_dir).await?;
    tokio::fs::write(state.config.uploads_dir.join(&name), &body).await?;
    tracing::info!("Uploaded image {} ({} bytes)", name, body.len());

    success(GalleryImage {
        url: format!("/uploads/{}", name),
        size: body.len() as u64,
        name,
    })
}

/// DELETE /api/admin/gallery/{name} - Remove an uploaded image.
pub async fn delete_image(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<()> {
    validate_image_name(&name)?;

    tokio::fs::remove_file(state.config.uploads_dir.join(&name))
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(format!("Image {} not found", name)),
            _ => e.into(),
        })?;
    tracing::info!("Deleted image {}", name);

    success(())
}
