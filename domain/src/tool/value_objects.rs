//! Tool domain value objects: immutable result and error types
//!
//! Every tool execution produces exactly one [`ToolResult`]. Failures are
//! data, never faults: the executor boundary converts everything into a
//! result the orchestrator can feed back to the model.
//!
//! Error codes form the taxonomy the conversation loop reacts to:
//!
//! | Code | Meaning |
//! |------|---------|
//! | `UNKNOWN_TOOL` | Name not in the registry (after alias resolution) |
//! | `BAD_ARGUMENTS` | Missing/unknown/mistyped parameters |
//! | `TIMEOUT` | `bash` exceeded its wall-clock budget |
//! | `NOT_FOUND` | Target file absent |
//! | `NO_MATCH` | `edit` matched the search text zero times |
//! | `AMBIGUOUS_MATCH` | `edit` default mode matched more than once |
//! | `COMMAND_FAILED` | `bash` exited non-zero |
//! | `IO` | Underlying I/O failure |

use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Stable error code (e.g. "NOT_FOUND", "TIMEOUT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new("UNKNOWN_TOOL", format!("Unknown tool: {}", name.into()))
    }

    pub fn bad_arguments(message: impl Into<String>) -> Self {
        Self::new("BAD_ARGUMENTS", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new("TIMEOUT", message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("File not found: {}", resource.into()))
    }

    pub fn no_match(message: impl Into<String>) -> Self {
        Self::new("NO_MATCH", message)
    }

    pub fn ambiguous_match(count: usize) -> Self {
        Self::new(
            "AMBIGUOUS_MATCH",
            format!(
                "old_string found {} times. Use replace_all=true or provide more context",
                count
            ),
        )
    }

    pub fn command_failed(exit_code: i32) -> Self {
        Self::new("COMMAND_FAILED", format!("Exit code: {}", exit_code))
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new("IO", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Structured metadata about a tool execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// For command execution: exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// For search operations: number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
}

/// Result of a tool execution
///
/// Invariant: `error` is present if and only if `success` is false.
/// `output` may be empty on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content
    pub output: String,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: output.into(),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result with empty output
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: String::new(),
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Add metadata to the result
    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach output to a result; failures may carry partial output
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Render this result as conversation context for the model
    pub fn as_context(&self) -> String {
        if self.success {
            format!("Result of {}:\n{}", self.tool_name, self.output)
        } else {
            let error = self
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            format!("Result of {}:\nError: {}", self.tool_name, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::not_found("a.txt");
        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.to_string().contains("a.txt"));
    }

    #[test]
    fn test_tool_result_success_has_no_error() {
        let result = ToolResult::success("read", "file contents");
        assert!(result.is_success());
        assert_eq!(result.output, "file contents");
        assert!(result.error().is_none());
    }

    #[test]
    fn test_tool_result_failure_carries_error() {
        let result = ToolResult::failure("edit", ToolError::ambiguous_match(3));
        assert!(!result.is_success());
        assert!(result.output.is_empty());
        assert_eq!(result.error().unwrap().code, "AMBIGUOUS_MATCH");
        assert!(result.error().unwrap().message.contains("3 times"));
    }

    #[test]
    fn test_as_context_formats_errors() {
        let ok = ToolResult::success("bash", "hello");
        assert_eq!(ok.as_context(), "Result of bash:\nhello");

        let failed = ToolResult::failure("bash", ToolError::command_failed(1));
        assert_eq!(failed.as_context(), "Result of bash:\nError: Exit code: 1");
    }
}
