//! HTML templates for server-rendered pages.
//!
//! Pages share one layout; `{{ placeholder }}` markers are substituted the
//! same way for every page. Text from the database is escaped, rendered
//! Markdown is inserted as-is.

use axum::http::StatusCode;
use htmlescape::{encode_attribute, encode_minimal};

use crate::content::{PostSummary, ResolvedPost};
use crate::i18n::{get_localized_slug, localized_path, routes, Language};
use crate::session::Theme;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}" data-theme="{{ theme }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
<meta name="description" content="{{ description }}">
<meta property="og:locale" content="{{ locale }}">
{{ alternates }}
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
<header><nav>{{ nav }}</nav><div class="language-switch">{{ switcher }}</div></header>
<main>
{{ content }}
</main>
<footer><a href="{{ privacy_href }}">{{ privacy_label }}</a></footer>
<script type="module" src="/static/site.js"></script>
</body>
</html>
"#;

/// Routes listed in the main navigation, in order.
const NAV_KEYS: [&str; 6] = [routes::HOME, "about", "projects", "experience", routes::BLOG, "contact"];

/// A page ready to be wrapped in the layout.
#[derive(Debug, Clone)]
pub struct Page {
    pub language: Language,
    pub title: String,
    pub description: String,
    /// Inner HTML of `<main>`
    pub body: String,
    /// Equivalent URL of this page in each language
    pub alternates: Vec<(Language, String)>,
}

/// Short UI strings that are not stored in the database.
pub fn label(language: Language, key: &str) -> &'static str {
    match (language, key) {
        (Language::En, "home") => "Home",
        (Language::It, "home") => "Home",
        (Language::En, "about") => "About",
        (Language::It, "about") => "Chi sono",
        (Language::En, "projects") => "Projects",
        (Language::It, "projects") => "Progetti",
        (Language::En, "experience") => "Experience",
        (Language::It, "experience") => "Esperienza",
        (Language::En, "blog") => "Blog",
        (Language::It, "blog") => "Blog",
        (Language::En, "contact") => "Contact",
        (Language::It, "contact") => "Contatti",
        (Language::En, "privacy") => "Privacy policy",
        (Language::It, "privacy") => "Informativa sulla privacy",
        (Language::En, "tagline") => "Software engineer building for the web and beyond.",
        (Language::It, "tagline") => "Ingegnere del software, sul web e oltre.",
        (Language::En, "no_posts") => "No articles yet.",
        (Language::It, "no_posts") => "Ancora nessun articolo.",
        (Language::En, "read_time") => "min read",
        (Language::It, "read_time") => "min di lettura",
        (Language::En, "featured") => "Featured",
        (Language::It, "featured") => "In evidenza",
        (Language::En, "send") => "Send",
        (Language::It, "send") => "Invia",
        (Language::En, "name") => "Name",
        (Language::It, "name") => "Nome",
        (Language::En, "message") => "Message",
        (Language::It, "message") => "Messaggio",
        (Language::En, "not_found") => "This page does not exist.",
        (Language::It, "not_found") => "Questa pagina non esiste.",
        (Language::En, "server_error") => "Something went wrong. Please try again later.",
        (Language::It, "server_error") => "Qualcosa è andato storto. Riprova più tardi.",
        (Language::En, "back_home") => "Back to the home page",
        (Language::It, "back_home") => "Torna alla home",
        _ => "",
    }
}

/// Wrap a page in the shared layout.
pub fn layout(page: &Page, theme: Option<Theme>) -> String {
    let lang = page.language;

    let nav: String = NAV_KEYS
        .iter()
        .map(|key| {
            format!(
                "<a href=\"{}\">{}</a>",
                localized_path(key, lang),
                label(lang, key)
            )
        })
        .collect();

    let switcher: String = page
        .alternates
        .iter()
        .map(|(alt, href)| {
            let current = if *alt == lang { " aria-current=\"true\"" } else { "" };
            format!(
                "<a href=\"{}\" hreflang=\"{}\"{}>{}</a>",
                encode_attribute(href),
                alt.code(),
                current,
                alt.code().to_uppercase()
            )
        })
        .collect();

    let alternates: String = page
        .alternates
        .iter()
        .map(|(alt, href)| {
            format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
                alt.code(),
                encode_attribute(href)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let theme = theme.map(|t| t.as_str()).unwrap_or("system");
    let title = encode_minimal(&page.title);
    let description = encode_attribute(&page.description);
    let privacy_href = localized_path("privacy", lang);
    fill(
        LAYOUT,
        &[
            ("lang", lang.code()),
            ("theme", theme),
            ("title", &title),
            ("description", &description),
            ("locale", lang.html_locale()),
            ("alternates", &alternates),
            ("nav", &nav),
            ("switcher", &switcher),
            ("privacy_href", &privacy_href),
            ("privacy_label", label(lang, "privacy")),
            ("content", &page.body),
        ],
    )
}

/// Substitute `{{ key }}` placeholders in one pass over `template`.
///
/// Inserted values are never scanned again. Unknown keys stay as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{ ") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let value = after.find(" }}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 3))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("{{ ");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Paths of a route in every language.
pub fn route_alternates(canonical_key: &str) -> Vec<(Language, String)> {
    Language::ALL
        .iter()
        .map(|&lang| (lang, localized_path(canonical_key, lang)))
        .collect()
}

pub fn home_page(language: Language) -> Page {
    let body = format!(
        "<section class=\"hero\"><h1>Portfolio</h1><p>{}</p></section>\n\
         <section class=\"links\"><a href=\"{}\">{}</a> <a href=\"{}\">{}</a></section>",
        label(language, "tagline"),
        localized_path("projects", language),
        label(language, "projects"),
        localized_path(routes::BLOG, language),
        label(language, "blog"),
    );
    Page {
        language,
        title: "Portfolio".to_string(),
        description: label(language, "tagline").to_string(),
        body,
        alternates: route_alternates(routes::HOME),
    }
}

/// Page for a static route other than home and blog.
pub fn route_page(canonical_key: &str, language: Language) -> Page {
    let title = label(language, canonical_key).to_string();
    let extra = match canonical_key {
        "experience" => "<canvas id=\"experience\" data-config=\"/api/experience\" data-scene=\"/api/experience/scene\"></canvas>".to_string(),
        "contact" => contact_form(language),
        _ => String::new(),
    };
    Page {
        language,
        description: format!("{} | Portfolio", title),
        body: format!(
            "<section class=\"page page-{}\"><h1>{}</h1>{}</section>",
            canonical_key,
            encode_minimal(&title),
            extra
        ),
        title,
        alternates: route_alternates(canonical_key),
    }
}

fn contact_form(language: Language) -> String {
    format!(
        "<form method=\"post\" action=\"/api/contact\" data-enhance>\
         <label>{name}<input name=\"name\" maxlength=\"100\" required></label>\
         <label>Email<input name=\"email\" type=\"email\" required></label>\
         <label>{message}<textarea name=\"message\" minlength=\"10\" maxlength=\"5000\" required></textarea></label>\
         <button type=\"submit\">{send}</button></form>",
        name = label(language, "name"),
        message = label(language, "message"),
        send = label(language, "send"),
    )
}

pub fn blog_index_page(language: Language, posts: &[PostSummary]) -> Page {
    let blog_slug = get_localized_slug(routes::BLOG, language);
    let items: String = if posts.is_empty() {
        format!("<p>{}</p>", label(language, "no_posts"))
    } else {
        let list: String = posts
            .iter()
            .map(|post| {
                let featured = if post.featured {
                    format!("<span class=\"badge\">{}</span> ", label(language, "featured"))
                } else {
                    String::new()
                };
                let read_time = post
                    .read_time_minutes
                    .map(|m| format!(" <small>{} {}</small>", m, label(language, "read_time")))
                    .unwrap_or_default();
                format!(
                    "<li lang=\"{}\">{}<a href=\"/{}/{}/{}\">{}</a>{}<p>{}</p></li>",
                    post.language.code(),
                    featured,
                    language.code(),
                    blog_slug,
                    encode_attribute(&post.slug),
                    encode_minimal(&post.title),
                    read_time,
                    encode_minimal(&post.abstract_text)
                )
            })
            .collect();
        format!("<ul class=\"posts\">{}</ul>", list)
    };

    Page {
        language,
        title: label(language, "blog").to_string(),
        description: format!("{} | Portfolio", label(language, "blog")),
        body: format!("<section class=\"blog\"><h1>{}</h1>{}</section>", label(language, "blog"), items),
        alternates: route_alternates(routes::BLOG),
    }
}

/// URL of an article in `language`.
pub fn article_path(language: Language, slug: &str) -> String {
    format!(
        "/{}/{}/{}",
        language.code(),
        get_localized_slug(routes::BLOG, language),
        slug
    )
}

pub fn article_page(language: Language, post: &ResolvedPost) -> Page {
    let banner = post
        .post
        .banner
        .as_ref()
        .map(|src| format!("<img class=\"banner\" src=\"{}\" alt=\"\">", encode_attribute(src)))
        .unwrap_or_default();
    let read_time = post
        .post
        .read_time_minutes
        .map(|m| format!("<small>{} {}</small>", m, label(language, "read_time")))
        .unwrap_or_default();

    let body = format!(
        "<article lang=\"{}\">{}<h1>{}</h1>{}<p class=\"abstract\">{}</p>\n{}</article>",
        post.language.code(),
        banner,
        encode_minimal(&post.title),
        read_time,
        encode_minimal(&post.abstract_text),
        post.html
    );

    Page {
        language,
        title: post.meta_title.clone(),
        description: post.meta_description.clone(),
        body,
        alternates: post
            .alternates
            .iter()
            .map(|(lang, slug)| (*lang, article_path(*lang, slug)))
            .collect(),
    }
}

/// Standalone error page for `status`.
pub fn error_page(language: Language, status: StatusCode) -> String {
    let message = if status == StatusCode::NOT_FOUND {
        label(language, "not_found")
    } else {
        label(language, "server_error")
    };
    let page = Page {
        language,
        title: format!("{} | Portfolio", status.as_u16()),
        description: message.to_string(),
        body: format!(
            "<section class=\"error\"><h1>{}</h1><p>{}</p><a href=\"{}\">{}</a></section>",
            status.as_u16(),
            message,
            localized_path(routes::HOME, language),
            label(language, "back_home")
        ),
        alternates: route_alternates(routes::HOME),
    };
    layout(&page, None)
}
