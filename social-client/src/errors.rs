//! Crate-wide error hierarchy for social-client.
//!
//! - Single root `Error` for all public functions.
//! - Status-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - Ergonomic `?` via `From` impls.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type SocialResult<T> = Result<T, Error>;

/// Root error type for the social-client crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote API (Graph API, imgbb, hcti) failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Missing or malformed environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local file access (reading an image before upload).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong while talking to a remote API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401), usually an expired access token.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of a response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value in {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16());
        }
        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }
        ProviderError::Network(e.to_string())
    }
}

impl ProviderError {
    /// Maps a non-success HTTP status code to a typed variant.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }
}

/// Fetches a required, non-empty environment variable.
pub(crate) fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
