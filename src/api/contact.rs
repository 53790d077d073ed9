//! Contact form endpoints.

use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    Form, Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{ContactForm, ContactMessage, ContactOutcome};
use crate::AppState;

/// Contact form body, URL-encoded from a plain form post or JSON from script.
pub struct ContactSubmission(pub ContactForm);

impl<S> FromRequest<S> for ContactSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let url_encoded = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let form = if url_encoded {
            let Form(form) = Form::<ContactForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form
        } else {
            let Json(form) = Json::<ContactForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form
        };
        Ok(Self(form))
    }
}

/// POST /api/contact - Validate and store a contact message.
///
/// Field errors are part of a successful response so the form can show them inline.
pub async fn submit_contact(
    State(state): State<AppState>,
    ContactSubmission(form): ContactSubmission,
) -> ApiResult<ContactOutcome> {
    let field_errors = form.validate();
    if !field_errors.is_empty() {
        tracing::debug!("Contact form rejected: {:?}", field_errors.keys());
        return success(ContactOutcome {
            accepted: false,
            field_errors,
        });
    }

    let message = state.repo.create_contact_message(&form).await?;
    tracing::info!("Contact message {} received", message.id);

    success(ContactOutcome {
        accepted: true,
        field_errors,
    })
}

#[derive(Debug, Serialize)]
pub struct ContactMessageList {
    pub messages: Vec<ContactMessage>,
}

/// GET /api/admin/contact - List received messages, newest first.
pub async fn list_contact_messages(State(state): State<AppState>) -> ApiResult<ContactMessageList> {
    let messages = state.repo.list_contact_messages().await?;
    success(ContactMessageList { messages })
}
