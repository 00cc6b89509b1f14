//! Bracket SDK - Rust client for the Bracket personality inference API
//!
//! This crate turns configuration and simple method calls into reliable,
//! authenticated HTTP requests against the Bracket JSON API.
//!
//! # Main Components
//!
//! - **Request Execution**: retry with exponential backoff, rate-limit
//!   aware delay selection, and observability hooks
//! - **Error Handling**: a fixed taxonomy of typed errors using `thiserror`
//! - **Configuration**: immutable config resolved from explicit arguments,
//!   a pre-built object, or `BRACKET_*` environment variables
//! - **Models**: typed views over inference payloads
//!
//! # Example
//!
//! ```no_run
//! use bracket_sdk::{BracketClient, Result};
//!
//! async fn example() -> Result<()> {
//!     let client = BracketClient::new("my-api-key")?;
//!     let result = client.infer_text("I love long walks on the beach.").await?;
//!     println!("openness: {:?}", result.scores.openness);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod pagination;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export main types for convenience
pub use client::{BracketClient, ClientBuilder, ResponseBody, HEALTH_PATH, TEXT_INFERENCE_PATH};
pub use config::{RequestHook, ResponseHook, RetryHook, SdkConfig};
pub use error::{Error, Result};
pub use http::{
    HookResult, HttpClient, Method, RawResponse, RequestEvent, RequestOptions, ResponseEvent,
    RetryEvent, RetryReason, StatusCode, Transport, TransportFault, TransportRequest,
};
pub use models::{OceanResult, OceanScores};
pub use pagination::Paginator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
