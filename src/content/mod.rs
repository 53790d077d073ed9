//! Content resolution for article pages.
//!
//! An article is reachable under its canonical slug and under the localized
//! slug of each translation. Resolution picks the best translation for the
//! requested language and reports whether the URL should be canonicalized.

use std::sync::Arc;

use serde::Serialize;

use crate::db::Repository;
use crate::errors::AppError;
use crate::i18n::Language;
use crate::markdown::render_markdown_to_html;
use crate::models::{Post, PostTranslation, PostWithTranslations};

/// A post rendered for one language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPost {
    pub post: Post,
    /// Language of the translation actually used; may differ from the request
    pub language: Language,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Slug to use in URLs for this language
    pub slug: String,
    /// Effective slug in every language the post can be shown in
    pub alternates: Vec<(Language, String)>,
    pub html: String,
}

/// Result of resolving a URL slug.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub post: Option<ResolvedPost>,
    pub should_redirect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_slug: Option<String>,
}

impl Resolution {
    fn not_found() -> Self {
        Self {
            post: None,
            should_redirect: false,
            correct_slug: None,
        }
    }
}

/// Summary of a published post for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub language: Language,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// Translation for `language`, else the default language's.
pub fn select_translation(
    translations: &[PostTranslation],
    language: Language,
) -> Option<&PostTranslation> {
    translations
        .iter()
        .find(|t| t.language == language)
        .or_else(|| translations.iter().find(|t| t.language == Language::DEFAULT))
}

/// Resolves posts from the repository.
#[derive(Clone)]
pub struct ContentService {
    repo: Arc<Repository>,
}

impl ContentService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Resolve `url_slug` in `language` to a published post.
    pub async fn resolve(&self, url_slug: &str, language: Language) -> Result<Resolution, AppError> {
        let Some(post) = self.repo.find_published_post(url_slug, language).await? else {
            return Ok(Resolution::not_found());
        };

        let translations = self.repo.list_translations(&post.id).await?;
        let Some(translation) = select_translation(&translations, language) else {
            tracing::warn!("Published post {} has no usable translation", post.slug);
            return Ok(Resolution::not_found());
        };

        let correct_slug = translation.effective_slug(&post).to_string();
        let should_redirect = url_slug != correct_slug;
        let alternates = Language::ALL
            .iter()
            .filter_map(|&lang| {
                select_translation(&translations, lang)
                    .map(|t| (lang, t.effective_slug(&post).to_string()))
            })
            .collect();

        let resolved = ResolvedPost {
            language: translation.language,
            title: translation.title.clone(),
            abstract_text: translation.abstract_text.clone(),
            meta_title: translation
                .meta_title
                .clone()
                .unwrap_or_else(|| translation.title.clone()),
            meta_description: translation
                .meta_description
                .clone()
                .unwrap_or_else(|| translation.abstract_text.clone()),
            slug: correct_slug.clone(),
            alternates,
            html: render_markdown_to_html(&translation.content),
            post,
        };

        Ok(Resolution {
            post: Some(resolved),
            should_redirect,
            correct_slug: Some(correct_slug),
        })
    }

    /// Published posts summarized in their best translation for `language`.
    pub async fn list_published(&self, language: Language) -> Result<Vec<PostSummary>, AppError> {
        let posts = self.repo.list_published_posts().await?;
        Ok(posts
            .iter()
            .filter_map(|p| summarize(p, language))
            .collect())
    }

    /// Effective slug of a post in `target`, for the language switcher.
    pub async fn slug_in_language(
        &self,
        url_slug: &str,
        current: Language,
        target: Language,
    ) -> Result<Option<String>, AppError> {
        let Some(post) = self.repo.find_published_post(url_slug, current).await? else {
            return Ok(None);
        };
        let translations = self.repo.list_translations(&post.id).await?;
        Ok(select_translation(&translations, target).map(|t| t.effective_slug(&post).to_string()))
    }
}

fn summarize(entry: &PostWithTranslations, language: Language) -> Option<PostSummary> {
    let translation = select_translation(&entry.translations, language)?;
    Some(PostSummary {
        id: entry.post.id.clone(),
        slug: translation.effective_slug(&entry.post).to_string(),
        language: translation.language,
        title: translation.title.clone(),
        abstract_text: translation.abstract_text.clone(),
        featured: entry.post.featured,
        banner: entry.post.banner.clone(),
        read_time_minutes: entry.post.read_time_minutes,
        published_at: entry.post.published_at.clone(),
    })
}
