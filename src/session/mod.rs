//! Signed session cookie carrying the visitor's theme and locale.
//!
//! The cookie value is `hex(json) "." hex(hmac_sha256(secret, hex(json)))`.
//! Anything that fails to verify is treated as an empty session.

use axum::http::{header, HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::AppError;
use crate::i18n::Language;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "__session";
const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Data stored in the session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Language>,
}

/// Signs and verifies session cookies with a server secret.
#[derive(Clone)]
pub struct SessionCodec {
    secret: Vec<u8>,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(format!("Invalid session secret: {}", e)))
    }

    pub fn encode(&self, session: &Session) -> Result<String, AppError> {
        let payload = hex::encode(serde_json::to_vec(session)?);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    /// Decode a cookie value, returning `None` when it is malformed or tampered with.
    pub fn decode(&self, value: &str) -> Option<Session> {
        let (payload, signature) = value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = hex::decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Read the session from request headers; missing or invalid cookies yield an empty session.
    pub fn from_headers(&self, headers: &HeaderMap) -> Session {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|cookies| cookie_value(cookies, COOKIE_NAME))
            .and_then(|value| self.decode(value))
            .unwrap_or_default()
    }

    /// `Set-Cookie` header value storing `session`.
    pub fn set_cookie_header(&self, session: &Session) -> Result<HeaderValue, AppError> {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            COOKIE_NAME,
            self.encode(session)?,
            MAX_AGE_SECS
        );
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))
    }
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim())
    })
}
