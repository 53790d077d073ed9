//! Supported languages and the localized routing tables.

mod negotiate;
pub mod routes;

pub use negotiate::*;
pub use routes::{get_canonical_key, get_localized_slug, is_route_key, localized_path};

use serde::{Deserialize, Serialize};

/// A language the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    It,
}

impl Language {
    /// Every supported language, default first.
    pub const ALL: [Language; 2] = [Language::En, Language::It];

    /// Language used when nothing better is known.
    pub const DEFAULT: Language = Language::En;

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "it" => Some(Language::It),
            _ => None,
        }
    }

    /// Value for the `lang` attribute and `og:locale`.
    pub fn html_locale(&self) -> &'static str {
        match self {
            Language::En => "en_US",
            Language::It => "it_IT",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
