//! Application layer for devmate
//!
//! This crate contains use cases, port definitions, and the session
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    conversation_logger::{ConversationLogger, NoConversationLog},
    llm_gateway::{GatewayError, LlmGateway, ModelInfo},
    tool_executor::ToolExecutorPort,
    turn_progress::{NoTurnProgress, TurnProgressNotifier},
};
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase, TurnOutcome, MAX_TURN_ITERATIONS};
