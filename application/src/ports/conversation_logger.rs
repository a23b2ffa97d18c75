//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording conversation
//! events (user input, model replies, tool calls and results) to a
//! structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! diagnostic messages, while this port captures the turn-by-turn
//! transcript in a machine-readable format (JSONL). The transcript is an
//! audit trail only; it is never read back to restore state.

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g. "user_input", "assistant_reply", "tool_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible so the
/// conversation loop never stalls on logging; failures are dropped.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLog;

impl ConversationLogger for NoConversationLog {
    fn log(&self, _event: ConversationEvent) {}
}
