//! Request executor: owns one logical call through success or terminal failure
//!
//! Runs the attempt loop, consults the retry policy for timing, the
//! classifier for terminal failures, and emits hook events at each
//! request/response/retry boundary. Retries are invisible to the caller on
//! success.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};
use serde_json::Value;
use url::Url;

use crate::config::SdkConfig;
use crate::error::{Error, Result};
use crate::http::auth::apply_auth_headers;
use crate::http::error::classify_terminal;
use crate::http::hooks::HookEmitter;
use crate::http::retry::{compute_backoff, decide_retry, RetryDecision, RetryReason};
use crate::http::transport::{RawResponse, ReqwestTransport, Transport, TransportRequest};
use crate::http::Method;

/// Per-call request parameters.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers for this call; merged with credential headers on
    /// every attempt.
    pub headers: Option<std::collections::HashMap<String, String>>,
    pub query: Option<Vec<(String, String)>>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn json(body: Value) -> Self {
        Self {
            json: Some(body),
            ..Self::default()
        }
    }

    pub fn query(pairs: Vec<(String, String)>) -> Self {
        Self {
            query: Some(pairs),
            ..Self::default()
        }
    }
}

/// Executes authenticated requests with retry, backoff, and hooks.
#[derive(Clone)]
pub struct HttpClient {
    config: Arc<SdkConfig>,
    transport: Arc<dyn Transport>,
    hooks: HookEmitter,
}

impl HttpClient {
    /// Create an executor backed by the production reqwest transport.
    pub fn new(config: Arc<SdkConfig>) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create an executor with an injected transport.
    pub fn with_transport(config: Arc<SdkConfig>, transport: Arc<dyn Transport>) -> Self {
        let hooks = HookEmitter::new(config.clone());
        Self {
            config,
            transport,
            hooks,
        }
    }

    /// Execute one logical call: at most `retries + 1` attempts.
    #[tracing::instrument(skip(self, options))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let retries = self.config.retries;
        let url = self.build_url(path, options.query.as_deref())?;
        let mut next_delay = 0.0_f64;

        for attempt in 0..=retries {
            if attempt > 0 && next_delay > 0.0 {
                tokio::time::sleep(Duration::from_secs_f64(next_delay)).await;
            }
            next_delay = 0.0;

            let headers = apply_auth_headers(
                options.headers.as_ref(),
                &self.config.api_key,
                self.config.client_id.as_deref(),
            );
            self.hooks
                .emit_request(&method, path, attempt, retries, &headers)?;
            debug!(
                "{} {} attempt {}/{}",
                method,
                path,
                attempt + 1,
                retries + 1
            );

            let transport_request = TransportRequest {
                method: method.clone(),
                url: url.clone(),
                headers,
                body: options.json.clone(),
                timeout: self.config.timeout,
            };

            let response = match self.transport.send(transport_request).await {
                Ok(response) => response,
                Err(fault) => {
                    if attempt >= retries {
                        error!("{} {} failed after {} attempts: {}", method, path, attempt + 1, fault);
                        return Err(Error::Network {
                            message: fault.to_string(),
                            source: Some(anyhow::Error::new(fault)),
                        });
                    }
                    next_delay = compute_backoff(attempt + 1, self.config.jitter);
                    warn!(
                        "{} {} attempt {}/{} failed ({}), retrying in {:.3}s",
                        method,
                        path,
                        attempt + 1,
                        retries + 1,
                        fault,
                        next_delay
                    );
                    self.hooks.emit_retry(
                        &method,
                        path,
                        attempt,
                        retries,
                        next_delay,
                        RetryReason::NetworkError,
                        None,
                    )?;
                    continue;
                }
            };

            self.hooks.emit_response(
                &method,
                path,
                attempt,
                retries,
                response.status,
                &response.headers,
            )?;

            if let RetryDecision::Retry {
                delay_seconds,
                reason,
            } = decide_retry(&self.config, &method, &response, attempt, retries)
            {
                next_delay = delay_seconds;
                warn!(
                    "{} {} got {} on attempt {}/{}, retrying in {:.3}s",
                    method,
                    path,
                    response.status,
                    attempt + 1,
                    retries + 1,
                    next_delay
                );
                self.hooks.emit_retry(
                    &method,
                    path,
                    attempt,
                    retries,
                    next_delay,
                    reason,
                    Some(response.status),
                )?;
                continue;
            }

            if let Some(error) = classify_terminal(&response) {
                return Err(error);
            }
            return Ok(response);
        }

        // Unreachable given the loop invariants; guards the exhausted edge.
        Err(Error::Network {
            message: "Request failed after retries.".to_string(),
            source: None,
        })
    }

    fn build_url(&self, path: &str, query: Option<&[(String, String)]>) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined).map_err(|e| Error::Configuration {
            message: format!("invalid request URL {}: {}", joined, e),
        })?;
        if let Some(pairs) = query {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }
}
