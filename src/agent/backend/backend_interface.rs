use async_trait::async_trait;
use std::time::Duration;

/// Reasons a live backend attempt did not produce a usable answer.
/// None of these reach the caller of the gateway.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed backend payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
}

/// Interface for a single-shot text generation backend
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Send one prompt to `model` and return the raw generated text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError>;

    /// Availability probe, used once at startup.
    async fn is_available(&self) -> bool;
}
