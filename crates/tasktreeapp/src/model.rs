//! # Domain Model
//!
//! A [`Task`] is one markdown document on disk. Most of its fields come from the
//! document's header block (see [`crate::document`]); the rest are derived from
//! where the document lives:
//!
//! - `file_name` / `file_path`: the document itself.
//! - `has_children`: a directory named after the document (extension stripped)
//!   exists next to it.
//! - `deleted`: the path passes through a `.deleted` directory.
//! - `children`: only filled in by a recursive load.
//!
//! ## Completion and Status
//!
//! `completed` and `status` describe the same thing twice, so every update
//! resolves them to one consistent pair via [`resolve_completion`]:
//!
//! 1. An explicit `status` wins: `completed = status == "Completed"`.
//! 2. Otherwise an explicit `completed` drives `status`
//!    (`"Completed"` / `"Pending"`).
//! 3. Otherwise the stored pair is kept as-is.
//!
//! `status` is an open string. Only `"Completed"` carries meaning here; any
//! other value is stored and returned untouched.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_COMPLETED: &str = "Completed";
pub const DEFAULT_PRIORITY: &str = "normal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub completed: bool,
    pub priority: String,
    pub due_date: Option<String>,
    pub status: String,
    pub created: String,
    pub file_name: String,
    pub file_path: PathBuf,
    pub has_children: bool,
    #[serde(default)]
    pub children: Vec<Task>,
    pub deleted: bool,
}

impl Task {
    /// Header and body fields, the part of a task that is written to disk.
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            completed: self.completed,
            body: self.body.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date.clone(),
            status: self.status.clone(),
            created: Some(self.created.clone()),
        }
    }

    /// Applies `update` on top of the current fields.
    ///
    /// Only the fields present in the update are touched, then completion and
    /// status are reconciled. `created` is never changed.
    pub fn merged(&self, update: &TaskUpdate) -> TaskFields {
        let mut fields = self.fields();
        if let Some(title) = &update.title {
            fields.title = title.clone();
        }
        if let Some(body) = &update.body {
            fields.body = body.clone();
        }
        if let Some(priority) = &update.priority {
            fields.priority = priority.clone();
        }
        if let Some(due_date) = &update.due_date {
            fields.due_date = due_date.clone();
        }

        let (completed, status) = resolve_completion(
            self.completed,
            &self.status,
            update.completed,
            update.status.as_deref(),
        );
        fields.completed = completed;
        fields.status = status;
        fields
    }

    /// Returns a copy without the loaded subtree.
    pub fn without_children(&self) -> Task {
        Task {
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// The persisted fields of a task, as consumed by [`crate::document::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub completed: bool,
    pub body: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub status: String,
    /// `None` means "stamp with the current time".
    pub created: Option<String>,
}

impl TaskFields {
    /// Fields for a brand new task.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            body: body.into(),
            priority: DEFAULT_PRIORITY.to_string(),
            due_date: None,
            status: STATUS_PENDING.to_string(),
            created: None,
        }
    }
}

/// A partial update. `None` leaves the field alone.
///
/// `due_date` is doubly optional: `Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due_date: Option<Option<String>>,
    pub status: Option<String>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolves the `(completed, status)` pair after an update.
pub fn resolve_completion(
    current_completed: bool,
    current_status: &str,
    new_completed: Option<bool>,
    new_status: Option<&str>,
) -> (bool, String) {
    match (new_status, new_completed) {
        (Some(status), _) => (status == STATUS_COMPLETED, status.to_string()),
        (None, Some(completed)) => (completed, status_for(completed).to_string()),
        (None, None) => (current_completed, current_status.to_string()),
    }
}

/// The canonical status for a completion flag.
pub fn status_for(completed: bool) -> &'static str {
    if completed {
        STATUS_COMPLETED
    } else {
        STATUS_PENDING
    }
}

/// A search match together with the titles of its ancestors, outermost first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub task: Task,
    pub breadcrumb: Vec<String>,
}

/// Report from the `doctor` operation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub directories_checked: usize,
    pub recovered_entries: usize,
    pub stale_entries_removed: usize,
    pub orphan_directories: Vec<PathBuf>,
}
