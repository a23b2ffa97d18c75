//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No model configured")]
    NoModel,

    #[error("Invalid model name: {0}")]
    InvalidModel(String),

    #[error("Invalid task index: {0}")]
    InvalidTaskIndex(usize),

    #[error("Orchestration error: {0}")]
    OrchestrationError(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
