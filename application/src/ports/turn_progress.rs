//! Turn execution progress port.
//!
//! [`TurnProgressNotifier`] is an output port that the presentation layer
//! implements to display the conversation loop as it unfolds. All methods
//! have no-op defaults, so implementers only override what they care about.

use devmate_domain::{ToolCall, ToolResult};

/// Progress notifier for one conversation turn
pub trait TurnProgressNotifier: Send + Sync {
    /// Called before each model round-trip
    fn on_model_call(&self, _iteration: usize, _max_iterations: usize) {}

    /// Called with each non-empty assistant message
    fn on_assistant_message(&self, _content: &str) {}

    /// Called when a round requests tool executions
    fn on_tools_requested(&self, _count: usize, _iteration: usize, _max_iterations: usize) {}

    /// Called before a single tool executes
    fn on_tool_call(&self, _call: &ToolCall) {}

    /// Called with each tool result
    fn on_tool_result(&self, _result: &ToolResult) {}

    /// Called when the model returned a blank reply and a retry is attempted
    fn on_empty_retry(&self) {}

    /// Called when the turn ends because the model stayed blank
    fn on_empty_response(&self) {}

    /// Called when the iteration cap terminates the turn
    fn on_iteration_cap(&self, _max_iterations: usize) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {}
