//! Configuration module for the portfolio server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Session secret used when none is configured. Only suitable for local development.
pub const DEV_SESSION_SECRET: &str = "portfolio-development-session-secret";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for the admin API (open when unset)
    pub admin_psk: Option<String>,
    /// Secret used to sign the session cookie
    pub session_secret: String,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Directory holding gallery uploads, served under /uploads
    pub uploads_dir: PathBuf,
    /// Directory holding static assets, served under /static
    pub static_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let admin_psk = env::var("PORTFOLIO_ADMIN_PSK").ok().filter(|s| !s.is_empty());

        let session_secret = env::var("PORTFOLIO_SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_SESSION_SECRET.to_string());

        let db_path = env::var("PORTFOLIO_DB_PATH")
            .unwrap_or_else(|_| "./data/portfolio.sqlite".to_string())
            .into();

        let index_path = env::var("PORTFOLIO_INDEX_PATH")
            .unwrap_or_else(|_| "./data/index".to_string())
            .into();

        let uploads_dir = env::var("PORTFOLIO_UPLOADS_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let static_dir = env::var("PORTFOLIO_STATIC_DIR")
            .unwrap_or_else(|_| "./static".to_string())
            .into();

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr.parse().map_err(|_| {
            AppError::Internal(format!("Invalid PORTFOLIO_BIND_ADDR format: {}", bind_addr))
        })?;

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            admin_psk,
            session_secret,
            db_path,
            index_path,
            uploads_dir,
            static_dir,
            bind_addr,
            log_level,
        })
    }

    /// Whether the session secret is still the development fallback.
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}
