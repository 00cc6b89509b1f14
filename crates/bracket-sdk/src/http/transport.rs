//! Pluggable transport seam
//!
//! The executor talks to the network through the [`Transport`] trait so
//! tests can inject scripted implementations. [`ReqwestTransport`] is the
//! production implementation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::SdkConfig;
use crate::error::{Error, Result};
use crate::http::Method;

/// One fully-formed attempt, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    /// Per-attempt timeout from the configuration.
    pub timeout: Duration,
}

/// A completed HTTP response, decoupled from any transport library.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RawResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body as a JSON value when parseable, else the raw text.
    pub fn payload(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::from)
    }
}

/// Transport-level failure: connection refused, DNS, timeout.
///
/// Distinct from the SDK error taxonomy; the executor decides whether a
/// fault is retried or wrapped into [`Error::Network`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportFault {
    pub message: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(anyhow::Error::new(err)),
        }
    }
}

/// A pluggable send primitive.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one physical send, returning the response or a fault.
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<RawResponse, TransportFault>;
}

/// Production transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the configuration's ambient headers.
    pub fn new(config: &SdkConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent =
            HeaderValue::from_str(&config.user_agent_value()).map_err(|_| Error::Configuration {
                message: format!("invalid user agent: {}", config.user_agent_value()),
            })?;
        default_headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<RawResponse, TransportFault> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(TransportFault::from)?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).to_string(),
            );
        }
        let body = response.text().await.map_err(TransportFault::from)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
