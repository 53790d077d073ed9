//! Localized loader wrapper.
//!
//! Every page path starts with a language segment. This module validates that
//! segment before a page's data loader runs and hands the loader the parsed
//! [`Language`]. Slug correctness is not checked here; article pages do that
//! through the content service.

use std::future::Future;

use serde::Serialize;

use crate::errors::AppError;
use crate::i18n::Language;

/// Outcome of validating the language segment of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageCheck {
    Supported(Language),
    /// Unsupported language at its bare root (`/fr`, `/fr/`).
    RedirectToRoot,
    NotFound,
}

/// Language of a path, or the default when its first segment is not a supported code.
pub fn language_of(path: &str) -> Language {
    match check_language(path) {
        LanguageCheck::Supported(language) => language,
        _ => Language::DEFAULT,
    }
}

/// Validate the first path segment as a supported language code.
pub fn check_language(path: &str) -> LanguageCheck {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (segment, rest) = match trimmed.split_once('/') {
        Some((segment, rest)) => (segment, rest),
        None => (trimmed, ""),
    };

    if let Some(language) = Language::parse(segment) {
        return LanguageCheck::Supported(language);
    }

    if !segment.is_empty() && rest.is_empty() {
        LanguageCheck::RedirectToRoot
    } else {
        LanguageCheck::NotFound
    }
}

/// Arguments passed to an inner loader.
#[derive(Debug, Clone)]
pub struct LoaderArgs {
    pub language: Language,
    pub path: String,
}

/// Page data returned when no inner loader is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageData {
    pub language: Language,
}

/// Result of a localized load.
#[derive(Debug)]
pub enum Loaded<T> {
    Data(T),
    Redirect(String),
}

/// Validate the language of `path`, then run `inner` with it.
///
/// Returns the inner loader's data unchanged, or [`LanguageData`] converted
/// into `T` when no loader is supplied.
pub async fn load_localized<T, F, Fut>(path: &str, inner: Option<F>) -> Result<Loaded<T>, AppError>
where
    T: From<LanguageData>,
    F: FnOnce(LoaderArgs) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let language = match check_language(path) {
        LanguageCheck::Supported(language) => language,
        LanguageCheck::RedirectToRoot => return Ok(Loaded::Redirect("/".to_string())),
        LanguageCheck::NotFound => {
            return Err(AppError::NotFound(format!("No page at {}", path)));
        }
    };

    match inner {
        Some(loader) => loader(LoaderArgs {
            language,
            path: path.to_string(),
        })
        .await
        .map(Loaded::Data),
        None => Ok(Loaded::Data(T::from(LanguageData { language }))),
    }
}
