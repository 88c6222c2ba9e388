//! Task records exchanged with the API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: u64,
    /// Human-readable title.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Creation time (RFC 3339 on the wire).
    #[serde(
        default,
        rename = "createdAt",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Task {
    /// Create an open task with no description.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            completed: false,
            created_at: None,
        }
    }

    /// Short status label.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.completed { "done" } else { "open" }
    }
}

/// Partial update sent with `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompletionPatch {
    pub(crate) completed: bool,
}

/// Counts over a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    /// Total number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
}

impl TaskSummary {
    /// Summarize `tasks`.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.completed).count(),
        }
    }

    /// Tasks not yet completed.
    #[must_use]
    pub const fn open(self) -> usize {
        self.total - self.completed
    }

    /// Completed share in `0.0..=1.0`; `0.0` for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
