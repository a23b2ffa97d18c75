//! User-visible work-item list.
//!
//! Purely presentational: the tracker reflects declared intent to the user
//! and never gates orchestrator control flow. Tasks are appended and
//! updated, never removed.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Status of a tracked task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single tracked work item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Imperative description ("Add login validation")
    pub content: String,
    /// Current status
    pub status: TaskStatus,
    /// Present-continuous form shown while in progress ("Adding login validation")
    pub active_form: String,
}

impl Task {
    pub fn new(content: impl Into<String>, active_form: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: TaskStatus::Pending,
            active_form: active_form.into(),
        }
    }

    /// Text to display for this task: the active form while in progress,
    /// the plain content otherwise.
    pub fn display_text(&self) -> &str {
        if self.status == TaskStatus::InProgress {
            &self.active_form
        } else {
            &self.content
        }
    }
}

/// Append-only list of tasks
#[derive(Debug, Clone, Default)]
pub struct TaskTracker {
    tasks: Vec<Task>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a new task in pending state
    pub fn add(&mut self, content: impl Into<String>, active_form: impl Into<String>) {
        self.tasks.push(Task::new(content, active_form));
    }

    /// Update the status of an existing task by position
    pub fn set_status(&mut self, index: usize, status: TaskStatus) -> Result<(), DomainError> {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.status = status;
                Ok(())
            }
            None => Err(DomainError::InvalidTaskIndex(index)),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
