//! Server-rendered page routes.
//!
//! Every page path goes through [`load_localized`]; the inner loaders decide
//! what the rest of the path means for the validated language.

pub mod templates;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

pub use templates::Page;

use crate::errors::{AppError, PageError};
use crate::i18n::{get_canonical_key, get_localized_slug, is_route_key, negotiate_language, routes};
use crate::loader::{language_of, load_localized, LanguageData, Loaded, LoaderArgs};
use crate::AppState;

/// What a page loader produced.
#[derive(Debug)]
pub enum PageOutcome {
    Render(Page),
    /// Canonicalize to another URL with a 301.
    MovedPermanently(String),
}

/// Pages without their own loader render the home page.
impl From<LanguageData> for PageOutcome {
    fn from(data: LanguageData) -> Self {
        PageOutcome::Render(templates::home_page(data.language))
    }
}

type NoLoader = fn(LoaderArgs) -> std::future::Ready<Result<PageOutcome, AppError>>;

fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}

/// Turn a loader result into an HTTP response.
fn respond(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
    loaded: Result<Loaded<PageOutcome>, AppError>,
) -> Result<Response, PageError> {
    let loaded = loaded.map_err(|e| PageError::new(e, language_of(path)))?;
    Ok(match loaded {
        Loaded::Redirect(to) => redirect(StatusCode::FOUND, &to),
        Loaded::Data(PageOutcome::MovedPermanently(to)) => {
            tracing::debug!("Canonicalizing {} to {}", path, to);
            redirect(StatusCode::MOVED_PERMANENTLY, &to)
        }
        Loaded::Data(PageOutcome::Render(page)) => {
            let theme = state.sessions.from_headers(headers).theme;
            Html(templates::layout(&page, theme)).into_response()
        }
    })
}

/// GET / - send the visitor to their preferred language.
pub async fn root(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.from_headers(&headers);
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let language = negotiate_language(session.locale, accept);
    redirect(StatusCode::FOUND, &format!("/{}", language.code()))
}

/// GET /{lang}
pub async fn home(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let loaded = load_localized::<PageOutcome, NoLoader, _>(uri.path(), None).await;
    respond(&state, &headers, uri.path(), loaded)
}

/// GET /{lang}/{slug} - a static route or the blog index.
pub async fn route(
    State(state): State<AppState>,
    Path((_, slug)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let content = state.content.clone();
    let loader = move |args: LoaderArgs| async move {
        let key = get_canonical_key(&slug);
        // Only the slug of the requested language is accepted.
        if key == routes::HOME || !is_route_key(&key) || get_localized_slug(&key, args.language) != slug {
            return Err(AppError::NotFound(format!("No page at {}", args.path)));
        }
        let page = if key == routes::BLOG {
            let posts = content.list_published(args.language).await?;
            templates::blog_index_page(args.language, &posts)
        } else {
            templates::route_page(&key, args.language)
        };
        Ok(PageOutcome::Render(page))
    };

    let loaded = load_localized(uri.path(), Some(loader)).await;
    respond(&state, &headers, uri.path(), loaded)
}

/// GET /{lang}/{blog}/{slug} - an article.
pub async fn article(
    State(state): State<AppState>,
    Path((_, section, slug)): Path<(String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let content = state.content.clone();
    let loader = move |args: LoaderArgs| async move {
        if section != get_localized_slug(routes::BLOG, args.language) {
            return Err(AppError::NotFound(format!("No page at {}", args.path)));
        }

        let resolution = content.resolve(&slug, args.language).await?;
        let Some(post) = resolution.post else {
            return Err(AppError::NotFound(format!("No article {}", slug)));
        };
        if resolution.should_redirect {
            return Ok(PageOutcome::MovedPermanently(templates::article_path(
                args.language,
                &post.slug,
            )));
        }
        Ok(PageOutcome::Render(templates::article_page(args.language, &post)))
    };

    let loaded = load_localized(uri.path(), Some(loader)).await;
    respond(&state, &headers, uri.path(), loaded)
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> PageError {
    PageError::not_found(language_of(uri.path()))
}
