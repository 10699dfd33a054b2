//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_IMAGE_UPLOAD_PRESET, DEFAULT_IMAGE_UPLOAD_TIMEOUT_SECONDS,
    DEFAULT_IMAGE_UPLOAD_URL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_SECONDS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_ttl_seconds: u64,
    pub cookie_secure: bool,
    pub image_upload_url: String,
    image_upload_preset: String,
    pub image_upload_timeout_seconds: u64,
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .field("image_upload_url", &self.image_upload_url)
            .field("image_upload_preset", &"[REDACTED]")
            .field("image_upload_timeout_seconds", &self.image_upload_timeout_seconds)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
            image_upload_url: DEFAULT_IMAGE_UPLOAD_URL.to_string(),
            image_upload_preset: DEFAULT_IMAGE_UPLOAD_PRESET.to_string(),
            image_upload_timeout_seconds: DEFAULT_IMAGE_UPLOAD_TIMEOUT_SECONDS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unset or unparsable values fall back to the development defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        if env::var("IMAGE_UPLOAD_PRESET").is_err() {
            tracing::warn!("IMAGE_UPLOAD_PRESET not set, using development preset");
        }

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            session_ttl_seconds: parse_var("SESSION_TTL_SECONDS")
                .unwrap_or(defaults.session_ttl_seconds),
            cookie_secure: parse_var("COOKIE_SECURE").unwrap_or(defaults.cookie_secure),
            image_upload_url: env::var("IMAGE_UPLOAD_URL").unwrap_or(defaults.image_upload_url),
            image_upload_preset: env::var("IMAGE_UPLOAD_PRESET")
                .unwrap_or(defaults.image_upload_preset),
            image_upload_timeout_seconds: parse_var("IMAGE_UPLOAD_TIMEOUT_SECONDS")
                .unwrap_or(defaults.image_upload_timeout_seconds),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Upload preset sent with every image upload.
    pub fn image_upload_preset(&self) -> &str {
        &self.image_upload_preset
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
