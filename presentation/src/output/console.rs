//! Console output formatter

use colored::Colorize;
use devmate_application::ports::llm_gateway::ModelInfo;
use devmate_domain::ToolResult;

/// Maximum characters of tool output echoed to the console per result
const RESULT_PREVIEW_CHARS: usize = 200;

/// Formats assistant output and tool results for the console
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an assistant reply with its speaker prefix
    pub fn assistant(content: &str) -> String {
        format!("{}\n{}", "devmate:".green().bold(), content)
    }

    /// One-line summary of a tool result
    pub fn tool_result(result: &ToolResult) -> String {
        if result.is_success() {
            let preview: String = result.output.chars().take(RESULT_PREVIEW_CHARS).collect();
            let preview = preview.replace('\n', " ");
            format!("{} {}: {}", "v".green(), result.tool_name.bold(), preview)
        } else {
            let message = result
                .error()
                .map(|e| e.message.as_str())
                .unwrap_or("unknown error");
            format!("{} {}: {}", "x".red(), result.tool_name.bold(), message)
        }
    }

    /// A yellow warning line
    pub fn warning(message: &str) -> String {
        format!("{} {}", "!".yellow().bold(), message.yellow())
    }

    /// Format the model list shown by /models
    pub fn model_list(models: &[ModelInfo], active: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Available models:".cyan().bold()));
        for model in models {
            output.push_str(&format!(
                "  * {} ({:.2} GB) - modified {}\n",
                model.name,
                model.size_gb(),
                model.modified_at
            ));
        }
        output.push_str(&format!("\nActive model: {}\n", active.bold()));
        output.push_str("Switch with: /model <name>");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devmate_domain::ToolError;

    #[test]
    fn test_tool_result_success_preview_is_single_line() {
        let result = ToolResult::success("bash", "line1\nline2");
        let line = ConsoleFormatter::tool_result(&result);
        assert!(line.contains("bash"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_tool_result_failure_shows_error() {
        let result = ToolResult::failure("edit", ToolError::no_match("old_string not found"));
        let line = ConsoleFormatter::tool_result(&result);
        assert!(line.contains("not found"));
    }

    #[test]
    fn test_model_list_names_active_model() {
        let models = vec![ModelInfo {
            name: "qwen3-coder:30b".into(),
            size_bytes: 1024,
            modified_at: "2025-06-01".into(),
        }];
        let output = ConsoleFormatter::model_list(&models, "qwen3-coder:30b");
        assert!(output.contains("qwen3-coder:30b"));
        assert!(output.contains("/model"));
    }
}
