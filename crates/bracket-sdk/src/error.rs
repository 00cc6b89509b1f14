//! Error types for the Bracket SDK
//!
//! Every failed call surfaces exactly one of these variants, using thiserror
//! for ergonomic error definitions and anyhow for wrapped sources.

use serde_json::Value;
use thiserror::Error;

/// Main error type for SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// API key authentication failed (HTTP 401/403)
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
        payload: Option<Value>,
    },

    /// Requested resource does not exist (HTTP 404)
    #[error("Resource not found: {message}")]
    NotFound {
        message: String,
        status_code: Option<u16>,
        payload: Option<Value>,
    },

    /// Rate limit exceeded and retries exhausted (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        status_code: Option<u16>,
        payload: Option<Value>,
    },

    /// Any other non-success API response (HTTP >= 400)
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        payload: Option<Value>,
    },

    /// Transport-level failure (connection, DNS, timeout) or retry exhaustion
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Invalid client configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An instrumentation hook returned an error
    #[error("Hook error: {message}")]
    Hook {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Response body could not be decoded as the expected JSON shape
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status code attached to a classified API error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication { status_code, .. }
            | Error::NotFound { status_code, .. }
            | Error::RateLimit { status_code, .. }
            | Error::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Parsed response payload attached to a classified API error, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Authentication { payload, .. }
            | Error::NotFound { payload, .. }
            | Error::RateLimit { payload, .. }
            | Error::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn hook(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Hook {
            message: source.to_string(),
            source: Some(anyhow::Error::from_boxed(source)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
