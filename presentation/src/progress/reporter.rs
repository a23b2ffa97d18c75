//! Live progress reporting for a conversation turn

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use devmate_application::ports::turn_progress::TurnProgressNotifier;
use devmate_domain::{ToolCall, ToolResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports turn progress with a thinking spinner and per-tool lines
pub struct TurnReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TurnReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap()
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock().unwrap() = Some(pb);
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }

    /// Clear any live spinner (for error paths that bypass the callbacks)
    pub fn finish(&self) {
        self.stop_spinner();
    }

    /// Pick the label shown for a tool call: its description when given,
    /// otherwise the first argument value.
    fn call_label(call: &ToolCall) -> String {
        if let Some(description) = call.get_str("description") {
            return description.to_string();
        }
        call.arguments
            .first()
            .map(|(_, v)| v.to_string())
            .unwrap_or_default()
    }
}

impl Default for TurnReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for TurnReporter {
    fn on_model_call(&self, iteration: usize, max_iterations: usize) {
        let message = if iteration == 1 {
            "Thinking...".to_string()
        } else {
            format!("Processing results ({}/{})...", iteration, max_iterations)
        };
        self.start_spinner(message);
    }

    fn on_assistant_message(&self, content: &str) {
        self.stop_spinner();
        println!("\n{}\n", ConsoleFormatter::assistant(content));
    }

    fn on_tools_requested(&self, count: usize, iteration: usize, max_iterations: usize) {
        println!(
            "{}",
            format!(
                "Running {} tool(s)... (iteration {}/{})",
                count, iteration, max_iterations
            )
            .dimmed()
        );
    }

    fn on_tool_call(&self, call: &ToolCall) {
        println!(
            "{}",
            format!("-> {}: {}", call.tool_name, Self::call_label(call)).dimmed()
        );
    }

    fn on_tool_result(&self, result: &ToolResult) {
        println!("{}", ConsoleFormatter::tool_result(result));
    }

    fn on_empty_retry(&self) {
        self.stop_spinner();
        println!(
            "{}",
            ConsoleFormatter::warning("Empty reply from the model, retrying with a simpler prompt")
        );
    }

    fn on_empty_response(&self) {
        self.stop_spinner();
        println!(
            "{}",
            ConsoleFormatter::warning("The model did not produce a response")
        );
    }

    fn on_iteration_cap(&self, max_iterations: usize) {
        self.stop_spinner();
        println!(
            "{}",
            ConsoleFormatter::warning(&format!(
                "Reached the limit of {} iterations",
                max_iterations
            ))
        );
    }
}
