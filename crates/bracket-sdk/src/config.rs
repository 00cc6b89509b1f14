//! SDK configuration
//!
//! `SdkConfig` is an immutable value type resolved once at client
//! construction and shared read-only across concurrent calls. Retry and
//! backoff behavior is entirely driven by these fields.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::hooks::{HookResult, RequestEvent, ResponseEvent, RetryEvent};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-sdk.demo.thebracket.ai";
/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default maximum retry count (attempts = retries + 1).
pub const DEFAULT_RETRIES: u32 = 3;
/// Default cap applied to server-provided Retry-After delays.
pub const DEFAULT_RETRY_AFTER_MAX_SECONDS: f64 = 30.0;

/// Environment variable consulted for the API key.
pub const ENV_API_KEY: &str = "BRACKET_API_KEY";
/// Environment variable consulted for the base URL.
pub const ENV_BASE_URL: &str = "BRACKET_BASE_URL";
/// Environment variable consulted for the client identifier.
pub const ENV_CLIENT_ID: &str = "BRACKET_CLIENT_ID";

/// Callback fired before each attempt is sent.
pub type RequestHook = Arc<dyn Fn(&RequestEvent) -> HookResult + Send + Sync>;
/// Callback fired after each received response.
pub type ResponseHook = Arc<dyn Fn(&ResponseEvent) -> HookResult + Send + Sync>;
/// Callback fired before each retry delay.
pub type RetryHook = Arc<dyn Fn(&RetryEvent) -> HookResult + Send + Sync>;

/// Immutable configuration for a Bracket client.
#[derive(Clone)]
pub struct SdkConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-attempt timeout, enforced by the transport.
    pub timeout: Duration,
    pub retries: u32,
    pub user_agent: Option<String>,
    pub client_id: Option<String>,
    /// Permit 5xx retries for methods outside the idempotent set.
    pub allow_non_idempotent_retries: bool,
    /// Honor server Retry-After hints on 429 responses.
    pub respect_retry_after: bool,
    /// Jitter is disabled by default for deterministic behavior in
    /// clients and tests.
    pub jitter: bool,
    pub retry_after_max_seconds: f64,
    // Hook errors are propagated to the caller.
    pub on_request: Option<RequestHook>,
    pub on_response: Option<ResponseHook>,
    pub on_retry: Option<RetryHook>,
}

impl SdkConfig {
    /// Create a configuration with the given API key and all defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            user_agent: None,
            client_id: None,
            allow_non_idempotent_retries: false,
            respect_retry_after: true,
            jitter: false,
            retry_after_max_seconds: DEFAULT_RETRY_AFTER_MAX_SECONDS,
            on_request: None,
            on_response: None,
            on_retry: None,
        }
    }

    /// Create a configuration from `BRACKET_*` environment variables.
    ///
    /// `BRACKET_API_KEY` is required; `BRACKET_BASE_URL` and
    /// `BRACKET_CLIENT_ID` are optional overrides.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY).unwrap_or_default();
        if api_key.is_empty() {
            return Err(Error::Configuration {
                message: format!("API key not found. Set {} environment variable", ENV_API_KEY),
            });
        }
        let mut config = Self::new(api_key);
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
        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum retry count
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the client identifier sent as `x-client-id`
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Permit or forbid 5xx retries for non-idempotent methods
    pub fn with_allow_non_idempotent_retries(mut self, allow: bool) -> Self {
        self.allow_non_idempotent_retries = allow;
        self
    }

    /// Honor or ignore server Retry-After hints
    pub fn with_respect_retry_after(mut self, respect: bool) -> Self {
        self.respect_retry_after = respect;
        self
    }

    /// Enable or disable backoff jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Cap server-provided Retry-After delays
    pub fn with_retry_after_max_seconds(mut self, seconds: f64) -> Self {
        self.retry_after_max_seconds = seconds;
        self
    }

    /// Register a before-request hook
    pub fn with_on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestEvent) -> HookResult + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(hook));
        self
    }

    /// Register an after-response hook
    pub fn with_on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ResponseEvent) -> HookResult + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(hook));
        self
    }

    /// Register a before-retry hook
    pub fn with_on_retry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RetryEvent) -> HookResult + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(hook));
        self
    }

    /// The User-Agent value sent with every request.
    pub fn user_agent_value(&self) -> String {
        match &self.user_agent {
            Some(user_agent) => user_agent.clone(),
            None => format!("bracket-sdk/{}", crate::VERSION),
        }
    }

    /// Validate that the configuration can authenticate requests.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Configuration {
                message: "api_key must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("user_agent", &self.user_agent)
            .field("client_id", &self.client_id)
            .field(
                "allow_non_idempotent_retries",
                &self.allow_non_idempotent_retries,
            )
            .field("respect_retry_after", &self.respect_retry_after)
            .field("jitter", &self.jitter)
            .field("retry_after_max_seconds", &self.retry_after_max_seconds)
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SdkConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.retries, DEFAULT_RETRIES);
        assert!(!config.allow_non_idempotent_retries);
        assert!(config.respect_retry_after);
        assert!(!config.jitter);
        assert_eq!(config.retry_after_max_seconds, 30.0);
        assert!(config.client_id.is_none());
    }

    #[test]
    fn test_default_user_agent_carries_version() {
        let config = SdkConfig::new("test-key");
        assert_eq!(
            config.user_agent_value(),
            format!("bracket-sdk/{}", crate::VERSION)
        );
    }

    #[test]
    fn test_custom_user_agent_wins() {
        let config = SdkConfig::new("test-key").with_user_agent("acme-ingest/2.1");
        assert_eq!(config.user_agent_value(), "acme-ingest/2.1");
    }

    #[test]
    fn test_builder_chain() {
        let config = SdkConfig::new("test-key")
            .with_base_url("https://staging.example.com")
            .with_retries(5)
            .with_jitter(true)
            .with_client_id("svc-reports");
        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.retries, 5);
        assert!(config.jitter);
        assert_eq!(config.client_id.as_deref(), Some("svc-reports"));
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let config = SdkConfig::new("");
        assert!(config.validate().is_err());
        assert!(SdkConfig::new("k").validate().is_ok());
    }

    #[test]
    fn test_from_env() {
        // Save original env var values for restoration
        let original_key = std::env::var(ENV_API_KEY).ok();
        let original_url = std::env::var(ENV_BASE_URL).ok();

        std::env::set_var(ENV_API_KEY, "env-key");
        std::env::set_var(ENV_BASE_URL, "https://env.example.com");

        let config = SdkConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "https://env.example.com");

        std::env::remove_var(ENV_API_KEY);
        let missing = SdkConfig::from_env();
        assert!(missing.is_err());

        // Restore original environment state
        match original_key {
            Some(key) => std::env::set_var(ENV_API_KEY, key),
            None => std::env::remove_var(ENV_API_KEY),
        }
        match original_url {
            Some(url) => std::env::set_var(ENV_BASE_URL, url),
            None => std::env::remove_var(ENV_BASE_URL),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = SdkConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
