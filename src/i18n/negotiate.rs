//! Language negotiation for requests that carry no language in the path.

use super::Language;

/// Pick a language: session locale first, then `Accept-Language`, then the default.
pub fn negotiate_language(session_locale: Option<Language>, accept_language: Option<&str>) -> Language {
    if let Some(lang) = session_locale {
        return lang;
    }

    accept_language
        .and_then(parse_accept_language)
        .unwrap_or(Language::DEFAULT)
}

/// Highest-weighted supported language in an `Accept-Language` header.
pub fn parse_accept_language(header: &str) -> Option<Language> {
    let mut entries: Vec<(&str, f64)> = header
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut segments = part.split(';');
            let tag = segments.next().unwrap_or("").trim();
            let q = segments
                .filter_map(|s| s.trim().strip_prefix("q="))
                .find_map(|v| v.parse::<f64>().ok())
                .unwrap_or(1.0);
            (tag, q)
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();

    // Stable sort keeps header order among equal weights.
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    entries.into_iter().find_map(|(tag, _)| {
        let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
        Language::parse(&primary)
    })
}
