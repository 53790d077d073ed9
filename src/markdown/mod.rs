//! Markdown to HTML rendering for stored post content.
//!
//! Output is not sanitized: raw HTML in a post is passed through. Post content
//! only comes from the admin API, never from visitors.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Relative image paths with these prefixes are served from the site root.
const ASSET_PREFIXES: [&str; 2] = ["static/", "uploads/"];

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

pub fn render_markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: rewrite_asset_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_out, parser);
    html_out
}

fn rewrite_asset_url(url: CowStr<'_>) -> CowStr<'_> {
    if ASSET_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
        CowStr::Boxed(format!("/{}", url).into_boxed_str())
    } else {
        url
    }
}
