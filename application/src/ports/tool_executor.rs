//! Tool Executor port
//!
//! Defines how the application layer dispatches tool calls. The concrete
//! executor (local file system, subprocesses) lives in infrastructure.

use async_trait::async_trait;
use devmate_domain::{ToolCall, ToolResult, ToolSpec};

/// Port for executing tools
///
/// The contract is total: every call yields exactly one [`ToolResult`],
/// with failures encoded as data. Nothing raises across this boundary.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the static specification of available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
