//! HTTP request execution engine
//!
//! This module provides the reliable core under the public client:
//! - Credential header merging
//! - Retry decisions with exponential backoff and Retry-After hints
//! - Terminal error classification and normalization
//! - Observability hooks with header redaction
//! - A pluggable transport seam over reqwest

pub mod auth;
pub mod client;
pub mod error;
pub mod hooks;
pub mod retry;
pub mod transport;

pub use auth::{apply_auth_headers, API_KEY_HEADER, CLIENT_ID_HEADER};
pub use client::{HttpClient, RequestOptions};
pub use hooks::{redact_headers, HookResult, RequestEvent, ResponseEvent, RetryEvent, REDACTED};
pub use retry::{
    compute_backoff, decide_retry, retry_after_seconds, RetryDecision, RetryReason,
    RETRY_AFTER_HEADER,
};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportFault, TransportRequest};

// Re-export commonly used types
pub use reqwest::{Method, StatusCode};
