//! Synchronous client facade
//!
//! Wraps the async client with an internal tokio runtime so every retry
//! and backoff decision is the same code as the async path; only the
//! suspension mechanism differs.

use serde_json::Value;

use crate::client::ResponseBody;
use crate::config::SdkConfig;
use crate::error::{Error, Result};
use crate::http::{Method, RawResponse, RequestOptions};
use crate::models::OceanResult;

/// Blocking client for the Bracket API.
///
/// Note: this creates a runtime internally, which is not ideal for
/// library code. Prefer [`crate::BracketClient`] when an async runtime is
/// already available.
pub struct BracketClient {
    inner: crate::BracketClient,
    runtime: tokio::runtime::Runtime,
}

impl BracketClient {
    /// Create a blocking client with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(SdkConfig::new(api_key))
    }

    /// Create a blocking client from a fully resolved configuration.
    pub fn from_config(config: SdkConfig) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Configuration {
            message: format!("Failed to create runtime: {}", e),
        })?;
        let inner = crate::BracketClient::from_config(config)?;
        Ok(Self { inner, runtime })
    }

    /// Create a blocking client with an injected transport.
    pub fn with_transport(
        config: SdkConfig,
        transport: std::sync::Arc<dyn crate::Transport>,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Configuration {
            message: format!("Failed to create runtime: {}", e),
        })?;
        let inner = crate::BracketClient::with_transport(config, transport)?;
        Ok(Self { inner, runtime })
    }

    pub fn config(&self) -> &SdkConfig {
        self.inner.config()
    }

    pub fn request_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        self.runtime
            .block_on(self.inner.request_raw(method, path, options))
    }

    pub fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody> {
        self.runtime
            .block_on(self.inner.request(method, path, options))
    }

    pub fn get(&self, path: &str, query: Option<Vec<(String, String)>>) -> Result<ResponseBody> {
        self.runtime.block_on(self.inner.get(path, query))
    }

    pub fn post(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        self.runtime.block_on(self.inner.post(path, json))
    }

    pub fn put(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        self.runtime.block_on(self.inner.put(path, json))
    }

    pub fn delete(&self, path: &str) -> Result<ResponseBody> {
        self.runtime.block_on(self.inner.delete(path))
    }

    pub fn health(&self) -> Result<ResponseBody> {
        self.runtime.block_on(self.inner.health())
    }

    pub fn infer_text(&self, text: &str) -> Result<OceanResult> {
        self.runtime.block_on(self.inner.infer_text(text))
    }
}
