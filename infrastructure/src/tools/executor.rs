//! Local tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! Routes parsed calls to the built-in tool functions after resolving
//! aliases and validating the call against its parameter schema. The
//! boundary is total: unknown names and schema violations come back as
//! failure results, never as faults.

use async_trait::async_trait;
use devmate_application::ports::tool_executor::ToolExecutorPort;
use devmate_domain::{
    DefaultToolValidator, ToolCall, ToolError, ToolResult, ToolSpec, ToolValidator,
};
use tracing::debug;

use super::{command, file, search};

/// Executor that runs tools on the local machine.
///
/// Tools run with the process's own privileges and no path confinement;
/// the REPL banner says as much to the user.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
}

impl LocalToolExecutor {
    /// Create a new executor with the default tool set
    pub fn new() -> Self {
        Self {
            tool_spec: super::default_tool_spec(),
        }
    }

    /// Create an executor with a custom tool spec (tests, specialized setups)
    pub fn with_tools(tool_spec: ToolSpec) -> Self {
        Self { tool_spec }
    }

    fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        // Resolve aliases, then look the canonical definition up
        let Some(canonical) = self.tool_spec.resolve(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::unknown_tool(&call.tool_name),
            );
        };
        let canonical = canonical.to_string();

        let definition = match self.tool_spec.get(&canonical) {
            Some(d) => d,
            None => {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::unknown_tool(&call.tool_name),
                )
            }
        };

        // Schema check before dispatch: a mismatch is a typed result, not a fault
        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&canonical, ToolError::bad_arguments(e));
        }

        debug!(tool = %canonical, "Dispatching tool call");

        match canonical.as_str() {
            command::BASH => command::execute_bash(call),
            file::READ => file::execute_read(call),
            file::WRITE => file::execute_write(call),
            file::EDIT => file::execute_edit(call),
            search::GLOB => search::execute_glob(call),
            search::GREP => search::execute_grep(call),
            _ => ToolResult::failure(&canonical, ToolError::unknown_tool(&canonical)),
        }
    }
}

impl Default for LocalToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("teleport");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "UNKNOWN_TOOL");
    }

    #[tokio::test]
    async fn test_executor_missing_required_argument() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("read");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "BAD_ARGUMENTS");
    }

    #[tokio::test]
    async fn test_executor_unknown_parameter() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("bash")
            .with_arg("command", "echo hi")
            .with_arg("sudo", true);
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "BAD_ARGUMENTS");
    }

    #[tokio::test]
    async fn test_executor_kind_mismatch() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("edit")
            .with_arg("file_path", "a.txt")
            .with_arg("old_string", "x")
            .with_arg("new_string", "y")
            .with_arg("replace_all", "yes");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "BAD_ARGUMENTS");
    }

    #[tokio::test]
    async fn test_executor_dispatches_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("f.txt");
        fs::write(&path, "executor test").unwrap();

        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("read").with_arg("file_path", path.to_str().unwrap());
        let result = executor.execute(&call).await;

        assert!(result.is_success());
        assert!(result.output.contains("executor test"));
    }

    #[tokio::test]
    async fn test_executor_resolves_alias() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("f.txt");
        fs::write(&path, "alias test").unwrap();

        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("read_file").with_arg("file_path", path.to_str().unwrap());
        let result = executor.execute(&call).await;

        assert!(result.is_success());
        assert!(result.output.contains("alias test"));
        // The result names the canonical tool
        assert_eq!(result.tool_name, "read");
    }

    #[tokio::test]
    async fn test_executor_bash_roundtrip() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new("bash").with_arg("command", "echo from-executor");
        let result = executor.execute(&call).await;

        assert!(result.is_success());
        assert!(result.output.contains("from-executor"));
    }
}
