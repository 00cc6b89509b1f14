//! Observability hooks fired at request, response, and retry boundaries
//!
//! Hook callbacks receive redacted header maps; the raw credential value
//! never reaches a hook-visible structure. Emission is skipped entirely,
//! including redaction, when no callback is registered. A hook error
//! aborts the in-flight call.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::SdkConfig;
use crate::error::{Error, Result};
use crate::http::auth::API_KEY_HEADER;
use crate::http::retry::RetryReason;
use crate::http::Method;

/// Marker substituted for sensitive header values in hook events.
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_HEADER_NAMES: [&str; 3] = [API_KEY_HEADER, "authorization", "proxy-authorization"];

/// Outcome of a hook callback; an `Err` aborts the call it instruments.
pub type HookResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Fired before each attempt is sent.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEvent {
    pub method: String,
    pub path: String,
    /// 1-based attempt number.
    pub attempt: u32,
    pub max_attempts: u32,
    /// Request headers with sensitive values redacted.
    pub headers: HashMap<String, String>,
}

/// Fired after a response is received, before any retry decision.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEvent {
    pub method: String,
    pub path: String,
    pub attempt: u32,
    pub max_attempts: u32,
    pub status_code: u16,
    /// Response headers with sensitive values redacted.
    pub headers: HashMap<String, String>,
}

/// Fired when an attempt failed and another will follow after a delay.
#[derive(Debug, Clone, Serialize)]
pub struct RetryEvent {
    pub method: String,
    pub path: String,
    pub attempt: u32,
    pub next_attempt: u32,
    pub max_attempts: u32,
    pub delay_seconds: f64,
    pub reason: RetryReason,
    /// Absent for transport faults.
    pub status_code: Option<u16>,
}

/// Replace sensitive header values with [`REDACTED`], case-insensitively.
pub fn redact_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let lowered = name.to_lowercase();
            if SENSITIVE_HEADER_NAMES.contains(&lowered.as_str()) {
                (name.clone(), REDACTED.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

/// Dispatches hook callbacks from the request executor.
///
/// Null checks live here so the executor can emit unconditionally.
#[derive(Clone)]
pub(crate) struct HookEmitter {
    config: Arc<SdkConfig>,
}

impl HookEmitter {
    pub fn new(config: Arc<SdkConfig>) -> Self {
        Self { config }
    }

    pub fn emit_request(
        &self,
        method: &Method,
        path: &str,
        attempt: u32,
        retries: u32,
        headers: &HashMap<String, String>,
    ) -> Result<()> {
        let Some(callback) = &self.config.on_request else {
            return Ok(());
        };
        let event = RequestEvent {
            method: method.to_string(),
            path: path.to_string(),
            attempt: attempt + 1,
            max_attempts: retries + 1,
            headers: redact_headers(headers),
        };
        callback(&event).map_err(Error::hook)
    }

    pub fn emit_response(
        &self,
        method: &Method,
        path: &str,
        attempt: u32,
        retries: u32,
        status_code: u16,
        headers: &HashMap<String, String>,
    ) -> Result<()> {
        let Some(callback) = &self.config.on_response else {
            return Ok(());
        };
        let event = ResponseEvent {
            method: method.to_string(),
            path: path.to_string(),
            attempt: attempt + 1,
            max_attempts: retries + 1,
            status_code,
            headers: redact_headers(headers),
        };
        callback(&event).map_err(Error::hook)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn emit_retry(
        &self,
        method: &Method,
        path: &str,
        attempt: u32,
        retries: u32,
        delay_seconds: f64,
        reason: RetryReason,
        status_code: Option<u16>,
    ) -> Result<()> {
        let Some(callback) = &self.config.on_retry else {
            return Ok(());
        };
        let event = RetryEvent {
            method: method.to_string(),
            path: path.to_string(),
            attempt: attempt + 1,
            next_attempt: attempt + 2,
            max_attempts: retries + 1,
            delay_seconds,
            reason,
            status_code,
        };
        callback(&event).map_err(Error::hook)
    }
}
