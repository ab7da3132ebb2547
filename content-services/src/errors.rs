//! Error type shared by the DeepL and Hugging Face clients.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ContentResult<T> = Result<T, ContentError>;

/// Which upstream produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    DeepL,
    HuggingFace,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::DeepL => f.write_str("DeepL"),
            Service::HuggingFace => f.write_str("HuggingFace"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A numeric environment variable failed to parse.
    #[error("invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    /// Upstream answered with a non-2xx status.
    #[error("{service} returned HTTP {status}: {snippet}")]
    HttpStatus {
        service: Service,
        status: StatusCode,
        snippet: String,
    },

    /// Network failure before a status was received.
    #[error("{service} transport error: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the client timeout.
    #[error("{service} request timed out after {after:?}")]
    Timeout { service: Service, after: Duration },

    /// The body did not have the documented shape.
    #[error("{service} response could not be decoded: {reason}")]
    Decode { service: Service, reason: String },

    /// Local file I/O (writing generated images).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("http client init failed: {0}")]
    ClientInit(reqwest::Error),
}

impl ContentError {
    pub(crate) fn transport(service: Service, e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            ContentError::Timeout {
                service,
                after: timeout,
            }
        } else {
            ContentError::Transport { service, source: e }
        }
    }

    pub(crate) fn decode(service: Service, reason: impl Into<String>) -> Self {
        ContentError::Decode {
            service,
            reason: reason.into(),
        }
    }
}

/// Reads a non-2xx response into [`ContentError::HttpStatus`] (body trimmed to 300 chars).
pub(crate) async fn status_error(service: Service, resp: reqwest::Response) -> ContentError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let snippet: String = body.trim().chars().take(300).collect();
    ContentError::HttpStatus {
        service,
        status,
        snippet,
    }
}

/// Fetches a required, non-empty environment variable.
pub(crate) fn must_env(name: &'static str) -> ContentResult<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ContentError::MissingVar(name)),
    }
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Parses an optional numeric variable, `default` when unset.
pub(crate) fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> ContentResult<T> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<T>()
                .map_err(|_| ContentError::InvalidNumber { var: name, value: v })
        }
        _ => Ok(default),
    }
}
