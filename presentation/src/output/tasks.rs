//! Task list rendering

use colored::Colorize;
use devmate_domain::{TaskStatus, TaskTracker};

/// Render the task tracker as an aligned console table.
///
/// Returns an empty string when there is nothing to show.
pub fn render_tasks(tracker: &TaskTracker) -> String {
    if tracker.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Task list".cyan().bold()));
    output.push_str(&format!("{:>3}  {:<12} Task\n", "#", "Status"));

    for (i, task) in tracker.tasks().iter().enumerate() {
        let status = match task.status {
            TaskStatus::Pending => "pending".dimmed().to_string(),
            TaskStatus::InProgress => "in progress".yellow().to_string(),
            TaskStatus::Completed => "completed".green().to_string(),
        };
        output.push_str(&format!("{:>3}  {:<12} {}\n", i + 1, status, task.display_text()));
    }

    output
}
