//! Portfolio Server
//!
//! A bilingual portfolio and blog: server-rendered pages behind a localized
//! routing layer, with SQLite persistence and Tantivy full-text search.

mod api;
mod auth;
mod config;
mod content;
mod db;
mod errors;
mod experience;
mod i18n;
mod loader;
mod markdown;
mod models;
mod pages;
mod search;
mod session;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use content::ContentService;
use db::Repository;
use search::SearchIndex;
use session::SessionCodec;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub content: ContentService,
    pub search: Arc<SearchIndex>,
    pub sessions: SessionCodec,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, search: Arc<SearchIndex>, config: Config) -> Self {
        Self {
            content: ContentService::new(repo.clone()),
            sessions: SessionCodec::new(&config.session_secret),
            repo,
            search,
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting portfolio server");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Index path: {:?}", config.index_path);
    tracing::info!("Uploads directory: {:?}", config.uploads_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (PORTFOLIO_ADMIN_PSK). Admin API is open!");
    }
    if config.uses_dev_secret() {
        tracing::warn!(
            "Using the development session secret. Set PORTFOLIO_SESSION_SECRET in production."
        );
    }

    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let search = Arc::new(SearchIndex::open(&config.index_path)?);
    tracing::info!("Building search index...");
    let posts = repo.list_published_posts().await?;
    search.rebuild(&posts).await?;
    tracing::info!("Search index built with {} posts", posts.len());

    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(repo, search, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.admin_psk.clone();

    let admin_routes = Router::new()
        // Gallery
        .route("/gallery", get(api::list_images))
        .route(
            "/gallery/{name}",
            put(api::upload_image)
                .delete(api::delete_image)
                .layer(DefaultBodyLimit::max(api::MAX_UPLOAD_BYTES)),
        )
        // Users
        .route("/users", post(api::create_user))
        // Posts
        .route("/posts", get(api::list_posts).post(api::create_post))
        .route(
            "/posts/{id}/translations/{language}",
            put(api::upsert_translation),
        )
        // Contact inbox
        .route("/contact", get(api::list_contact_messages))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(psk.clone(), req, next)
        }));

    let api_routes = Router::new()
        .route("/theme", post(api::set_theme))
        .route("/language-switch", get(api::language_switch))
        .route("/search", get(api::search_posts))
        .route("/contact", post(api::submit_contact))
        .route("/experience", get(api::get_experience))
        .route("/experience/scene", get(api::get_scene))
        .nest("/admin", admin_routes);

    let page_routes = Router::new()
        .route("/", get(pages::root))
        .route("/{lang}", get(pages::home))
        .route("/{lang}/", get(pages::home))
        .route("/{lang}/{slug}", get(pages::route))
        .route("/{lang}/{section}/{slug}", get(pages::article));

    let static_dir = ServeDir::new(&state.config.static_dir);
    let uploads_dir = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .route("/health", get(health_check))
        .nest_service("/static", static_dir)
        .nest_service("/uploads", uploads_dir)
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
