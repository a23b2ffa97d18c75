//! LLM Gateway port
//!
//! Defines the interface for communicating with the chat backend. The
//! backend is opaque: it takes the full ordered message history and returns
//! one assistant message. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use devmate_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during gateway operations
///
/// A gateway error is the one failure class that aborts the current turn
/// outright; it is reported to the user and never retried automatically.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Metadata about an installed model, as reported by the backend
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model tag (e.g. "qwen3-coder:30b")
    pub name: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Last-modified timestamp, as reported
    pub modified_at: String,
}

impl ModelInfo {
    pub fn size_gb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

/// Gateway for LLM communication
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the full message history and receive one assistant reply.
    ///
    /// There is no timeout on this call: a hanging backend blocks the turn.
    async fn chat(&self, model: &Model, messages: &[Message]) -> Result<Message, GatewayError>;

    /// List the models installed on the backend
    async fn available_models(&self) -> Result<Vec<ModelInfo>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_size_gb() {
        let info = ModelInfo {
            name: "test".to_string(),
            size_bytes: 3 * 1024 * 1024 * 1024,
            modified_at: "2025-01-01T00:00:00Z".to_string(),
        };
        assert!((info.size_gb() - 3.0).abs() < f64::EPSILON);
    }
}
