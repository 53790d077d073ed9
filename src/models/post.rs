//! Blog post and translation models.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Publication state of a post. Only published posts are visible on the site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            "archived" => Some(PostStatus::Archived),
            _ => None,
        }
    }
}

/// A blog post, independent of language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    /// Canonical, language-neutral slug
    pub slug: String,
    pub status: PostStatus,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub author_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Per-language text of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTranslation {
    pub post_id: String,
    pub language: Language,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Markdown source
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl PostTranslation {
    /// Slug used in URLs for this language: the localized slug, else the post's.
    pub fn effective_slug<'a>(&'a self, post: &'a Post) -> &'a str {
        self.localized_slug.as_deref().unwrap_or(&post.slug)
    }
}

/// A post together with all of its translations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithTranslations {
    #[serde(flatten)]
    pub post: Post,
    pub translations: Vec<PostTranslation>,
}

/// Request body for creating a new post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub slug: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub read_time_minutes: Option<i64>,
    /// Defaults to now when the post is created as published
    #[serde(default)]
    pub published_at: Option<String>,
    pub author_id: String,
}

/// Request body for creating or replacing one translation of a post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTranslationRequest {
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    pub content: String,
    #[serde(default)]
    pub localized_slug: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Slugs are lowercase kebab-case.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    let is_valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err(format!("Slug {:?} must be lowercase kebab-case", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_strings() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(PostStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PostStatus::parse("deleted"), None);
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("hello-world").is_ok());
        assert!(validate_slug("ciao-mondo-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("-lead").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("with space").is_err());
    }

    #[test]
    fn test_translation_serializes_abstract_field() {
        let t = PostTranslation {
            post_id: "p1".into(),
            language: Language::It,
            title: "Ciao".into(),
            abstract_text: "Breve".into(),
            content: "# Ciao".into(),
            localized_slug: None,
            meta_title: None,
            meta_description: None,
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["abstract"], "Breve");
        assert_eq!(json["language"], "it");
        assert!(json.get("localizedSlug").is_none());
    }
}
