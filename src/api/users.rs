//! Admin user endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{is_valid_email, CreateUserRequest, User};
use crate::AppState;

const ROLES: [&str; 2] = ["admin", "author"];

/// POST /api/admin/users - Create a user. Emails are unique.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if !is_valid_email(request.email.trim()) {
        return Err(AppError::Validation("Email address is not valid".to_string()));
    }
    if !ROLES.contains(&request.role.as_str()) {
        return Err(AppError::Validation(format!("Unknown role: {}", request.role)));
    }

    let user = state.repo.create_user(&request).await?;
    tracing::info!("Created user {}", user.id);
    success(user)
}
