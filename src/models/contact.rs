//! Contact form submissions and their validation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 254;
pub const MESSAGE_MIN_LEN: usize = 10;
pub const MESSAGE_MAX_LEN: usize = 5000;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LEN && EMAIL_PATTERN.is_match(email)
}

/// Contact form body as posted by the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Field name to error message; empty when the form is valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

impl ContactForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required".to_string());
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.insert("name", format!("Name must be at most {} characters", NAME_MAX_LEN));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required".to_string());
        } else if !is_valid_email(email) {
            errors.insert("email", "Email address is not valid".to_string());
        }

        let length = self.message.trim().chars().count();
        if length < MESSAGE_MIN_LEN {
            errors.insert(
                "message",
                format!("Message must be at least {} characters", MESSAGE_MIN_LEN),
            );
        } else if length > MESSAGE_MAX_LEN {
            errors.insert(
                "message",
                format!("Message must be at most {} characters", MESSAGE_MAX_LEN),
            );
        }

        errors
    }
}

/// A stored contact message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

/// Result returned to the form; field errors are shown inline.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: FieldErrors,
}
