//! Retry decisions and backoff timing
//!
//! Stateless policy functions consulted once per attempt by the request
//! executor. Backoff is exponential with a 200ms base unit; jitter, when
//! enabled, draws uniformly from `[0, base)`. With jitter disabled the
//! delay sequence is fully deterministic.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::config::SdkConfig;
use crate::http::transport::RawResponse;
use crate::http::Method;

/// Response header carrying a server-provided retry delay hint.
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Why a retry was scheduled, as reported to the on-retry hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryReason {
    NetworkError,
    RateLimit,
    #[serde(rename = "http_5xx")]
    Http5xx,
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryReason::NetworkError => write!(f, "network_error"),
            RetryReason::RateLimit => write!(f, "rate_limit"),
            RetryReason::Http5xx => write!(f, "http_5xx"),
        }
    }
}

/// Decision on whether to retry a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryDecision {
    /// Retry after the given delay.
    Retry {
        delay_seconds: f64,
        reason: RetryReason,
    },
    /// Stop: return the response or raise the classified error.
    Stop,
}

/// Compute the exponential backoff delay for the given retry.
///
/// `retry_number` starts at 1 for the first retry; the base delay is
/// `0.2 * 2^(retry_number - 1)` seconds.
pub fn compute_backoff(retry_number: u32, jitter: bool) -> f64 {
    let delay = 0.2 * f64::powi(2.0, retry_number as i32 - 1);
    if jitter {
        return rand::thread_rng().gen_range(0.0..delay);
    }
    delay
}

/// Parse a Retry-After header value into a delay in seconds.
///
/// Accepts a plain number of seconds or an HTTP-date; the result is
/// clamped to `[0, cap_seconds]`. Returns `None` for absent, empty, or
/// unparsable values.
pub fn retry_after_seconds(raw: Option<&str>, cap_seconds: f64) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let delay = match raw.parse::<f64>() {
        Ok(seconds) => seconds,
        Err(_) => {
            let retry_at = DateTime::parse_from_rfc2822(raw).ok()?;
            let remaining = retry_at.with_timezone(&Utc).signed_duration_since(Utc::now());
            remaining.num_milliseconds() as f64 / 1000.0
        }
    };
    if !delay.is_finite() {
        return None;
    }

    Some(delay.max(0.0).min(cap_seconds))
}

/// Decide whether a received response warrants another attempt.
///
/// 429 responses are always retry-eligible; 5xx responses only for
/// idempotent methods unless the configuration opts non-idempotent
/// methods in. Anything else stops the loop.
pub fn decide_retry(
    config: &SdkConfig,
    method: &Method,
    response: &RawResponse,
    attempt: u32,
    retries: u32,
) -> RetryDecision {
    if attempt >= retries {
        return RetryDecision::Stop;
    }

    if response.status == 429 {
        if config.respect_retry_after {
            if let Some(delay) = retry_after_seconds(
                response.header(RETRY_AFTER_HEADER),
                config.retry_after_max_seconds,
            ) {
                return RetryDecision::Retry {
                    delay_seconds: delay,
                    reason: RetryReason::RateLimit,
                };
            }
        }
        return RetryDecision::Retry {
            delay_seconds: compute_backoff(attempt + 1, config.jitter),
            reason: RetryReason::RateLimit,
        };
    }

    if response.status >= 500 && is_retryable_method(config, method) {
        return RetryDecision::Retry {
            delay_seconds: compute_backoff(attempt + 1, config.jitter),
            reason: RetryReason::Http5xx,
        };
    }

    RetryDecision::Stop
}

fn is_retryable_method(config: &SdkConfig, method: &Method) -> bool {
    is_idempotent(method) || config.allow_non_idempotent_retries
}

/// Methods safe to retry without side-effect duplication risk.
fn is_idempotent(method: &Method) -> bool {
    matches!(
        method.as_str(),
        "GET" | "HEAD" | "OPTIONS" | "TRACE" | "PUT" | "DELETE"
    )
}
