//! High-level Bracket API client
//!
//! Thin, ergonomic surface over the request executor: verb helpers,
//! content-type aware body parsing, and wrappers for the service
//! endpoints. Configuration is resolved once at construction with the
//! precedence explicit builder argument > pre-built config > environment
//! variable > default.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::config::{SdkConfig, ENV_API_KEY, ENV_BASE_URL, ENV_CLIENT_ID};
use crate::error::{Error, Result};
use crate::http::{HttpClient, Method, RawResponse, RequestOptions, Transport};
use crate::models::OceanResult;
use crate::pagination::Paginator;

/// Health probe endpoint.
pub const HEALTH_PATH: &str = "/v1/health";
/// Text inference endpoint.
pub const TEXT_INFERENCE_PATH: &str = "/v1/modules/text/inference";

/// A response body interpreted by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/json` responses, decoded.
    Json(Value),
    /// Any other non-empty body, verbatim.
    Text(String),
    /// An empty body.
    Empty,
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Asynchronous client for the Bracket API.
#[derive(Clone)]
pub struct BracketClient {
    config: Arc<SdkConfig>,
    http: HttpClient,
}

impl BracketClient {
    /// Create a client with the given API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(SdkConfig::new(api_key))
    }

    /// Create a client from a fully resolved configuration.
    pub fn from_config(config: SdkConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let http = HttpClient::new(config.clone())?;
        Ok(Self { config, http })
    }

    /// Create a client with an injected transport.
    pub fn with_transport(config: SdkConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let http = HttpClient::with_transport(config.clone(), transport);
        Ok(Self { config, http })
    }

    /// Start building a client, resolving unset fields from the
    /// environment and defaults.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Execute a request and return the raw response.
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        self.http.request(method, path, options).await
    }

    /// Execute a request and interpret the body by content type.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody> {
        let response = self.http.request(method, path, options).await?;
        parse_response(&response)
    }

    pub async fn get(
        &self,
        path: &str,
        query: Option<Vec<(String, String)>>,
    ) -> Result<ResponseBody> {
        let options = RequestOptions {
            query,
            ..RequestOptions::default()
        };
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        let options = RequestOptions {
            json,
            ..RequestOptions::default()
        };
        self.request(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        let options = RequestOptions {
            json,
            ..RequestOptions::default()
        };
        self.request(Method::PUT, path, options).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseBody> {
        self.request(Method::DELETE, path, RequestOptions::default())
            .await
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<ResponseBody> {
        self.get(HEALTH_PATH, None).await
    }

    /// Run text inference and parse the OCEAN score payload.
    #[tracing::instrument(skip(self, text))]
    pub async fn infer_text(&self, text: &str) -> Result<OceanResult> {
        let body = self
            .post(TEXT_INFERENCE_PATH, Some(json!({ "text": text })))
            .await?;
        match body {
            ResponseBody::Json(payload) => OceanResult::from_payload(&payload),
            _ => Err(Error::Json {
                message: "inference endpoint returned a non-JSON response".to_string(),
                source: None,
            }),
        }
    }

    /// Iterate a cursor-paginated list endpoint.
    pub fn paginate(&self, path: impl Into<String>) -> Paginator<'_> {
        Paginator::new(self, path.into())
    }
}

fn parse_response(response: &RawResponse) -> Result<ResponseBody> {
    let content_type = response.header("content-type").unwrap_or("");
    if content_type.contains("application/json") {
        let value = serde_json::from_str(&response.body)?;
        return Ok(ResponseBody::Json(value));
    }
    if !response.body.is_empty() {
        return Ok(ResponseBody::Text(response.body.clone()));
    }
    Ok(ResponseBody::Empty)
}

/// Builder resolving client configuration from several sources.
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    client_id: Option<String>,
    user_agent: Option<String>,
    config: Option<SdkConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Start from a pre-built configuration; explicit builder arguments
    /// still take precedence over its fields.
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<BracketClient> {
        let mut config = match self.config {
            Some(config) => config,
            None => {
                // No config object: the environment fills anything not
                // supplied explicitly.
                let mut config =
                    SdkConfig::new(std::env::var(ENV_API_KEY).unwrap_or_default());
                if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
                    if !base_url.is_empty() {
                        config.base_url = base_url;
                    }
                }
                if let Ok(client_id) = std::env::var(ENV_CLIENT_ID) {
                    if !client_id.is_empty() {
                        config.client_id = Some(client_id);
                    }
                }
                config
            }
        };

        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(client_id) = self.client_id {
            config.client_id = Some(client_id);
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = Some(user_agent);
        }

        match self.transport {
            Some(transport) => BracketClient::with_transport(config, transport),
            None => BracketClient::from_config(config),
        }
    }
}
