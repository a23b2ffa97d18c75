//! Domain layer for devmate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool-call protocol
//!
//! The assistant model requests local operations by embedding
//! `TOOL:name(key="value", ...)` invocations in otherwise free-form prose.
//! [`parse_tool_calls`] extracts them, ignoring invocations that appear only
//! inside code blocks or markdown tables (the system prompt carries worked
//! examples that must never execute).
//!
//! ## Conversation
//!
//! An append-only sequence of role-tagged messages. Nothing is ever mutated
//! or removed once appended, so the history doubles as an audit trail.

pub mod agent;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    call_parser::parse_tool_calls,
    tasks::{Task, TaskStatus, TaskTracker},
};
pub use core::{error::DomainError, model::Model};
pub use prompt::AssistantPromptTemplate;
pub use session::entities::{Conversation, Message, Role};
pub use tool::{
    entities::{ArgValue, ParamKind, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
