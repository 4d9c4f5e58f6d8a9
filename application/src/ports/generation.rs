//! Generation Service port
//!
//! Defines the interface for turning prompts into text or structured objects.

use async_trait::async_trait;
use buildcrew_domain::ResponseShape;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    /// The call succeeded but the payload could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the text generation backend
///
/// This port defines how the application layer requests generated content.
/// Implementations (adapters) live in the infrastructure layer. Timeouts
/// and cancellation belong to the adapter, not to the pipeline.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate a JSON object following `shape`.
    ///
    /// Adapters only guarantee a decoded JSON value; structural validation
    /// against the shape happens in the agent runner.
    async fn generate_structured(
        &self,
        prompt: &str,
        shape: &ResponseShape,
    ) -> Result<Value, GenerationError>;

    /// Generate free text
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;
}
