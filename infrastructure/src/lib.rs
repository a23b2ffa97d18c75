//! Infrastructure layer for devmate
//!
//! Concrete adapters for the application-layer ports: local tool execution,
//! the Ollama chat backend, project detection, configuration loading, and
//! conversation transcript logging.

pub mod config;
pub mod logging;
pub mod ollama;
pub mod project;
pub mod tools;

pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use ollama::OllamaGateway;
pub use project::{detect_framework, project_context, FrameworkInfo};
pub use tools::{default_tool_spec, LocalToolExecutor};
