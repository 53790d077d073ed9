//! Static map between canonical route keys and per-language URL slugs.

use super::Language;

/// One canonical route and its slug in every supported language.
#[derive(Debug)]
pub struct RouteEntry {
    pub canonical_key: &'static str,
    pub slugs: &'static [(Language, &'static str)],
}

impl RouteEntry {
    pub fn slug(&self, language: Language) -> Option<&'static str> {
        self.slugs
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, slug)| *slug)
    }
}

/// Canonical key of the home page. Its slug is empty in every language.
pub const HOME: &str = "home";
/// Canonical key of the blog index; articles live beneath it.
pub const BLOG: &str = "blog";

pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        canonical_key: HOME,
        slugs: &[(Language::En, ""), (Language::It, "")],
    },
    RouteEntry {
        canonical_key: "about",
        slugs: &[(Language::En, "about"), (Language::It, "chi-sono")],
    },
    RouteEntry {
        canonical_key: "projects",
        slugs: &[(Language::En, "projects"), (Language::It, "progetti")],
    },
    RouteEntry {
        canonical_key: "experience",
        slugs: &[(Language::En, "experience"), (Language::It, "esperienza")],
    },
    RouteEntry {
        canonical_key: BLOG,
        slugs: &[(Language::En, "blog"), (Language::It, "blog")],
    },
    RouteEntry {
        canonical_key: "contact",
        slugs: &[(Language::En, "contact"), (Language::It, "contatti")],
    },
    RouteEntry {
        canonical_key: "privacy",
        slugs: &[(Language::En, "privacy"), (Language::It, "privacy")],
    },
];

fn find_entry(canonical_key: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|e| e.canonical_key == canonical_key)
}

/// Slug for `canonical_key` in `language`, or the key itself when unmapped.
pub fn get_localized_slug(canonical_key: &str, language: Language) -> String {
    find_entry(canonical_key)
        .and_then(|e| e.slug(language))
        .unwrap_or(canonical_key)
        .to_string()
}

/// Canonical key owning `slug` in any language, or the slug itself when unmapped.
pub fn get_canonical_key(slug: &str) -> String {
    ROUTES
        .iter()
        .find(|e| e.slugs.iter().any(|(_, s)| *s == slug))
        .map(|e| e.canonical_key)
        .unwrap_or(slug)
        .to_string()
}

pub fn is_route_key(key: &str) -> bool {
    find_entry(key).is_some()
}

/// Root-absolute path of a route, e.g. `/it/contatti` or `/en` for the home page.
pub fn localized_path(canonical_key: &str, language: Language) -> String {
    let slug = get_localized_slug(canonical_key, language);
    if slug.is_empty() {
        format!("/{}", language.code())
    } else {
        format!("/{}/{}", language.code(), slug)
    }
}
