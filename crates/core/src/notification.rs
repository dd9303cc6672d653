//! Notification kinds, wording, and listing limits.

use crate::task::AssignmentChange;
use crate::types::DbId;

/// Kind tag for a task created with an assignee.
pub const KIND_TASK_ASSIGNED: &str = "task_assigned";

/// Kind tag for a task moved to a different assignee.
pub const KIND_TASK_REASSIGNED: &str = "task_reassigned";

/// Default page size for notification listing.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for notification listing.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Rendered content of an assignment notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMessage {
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub link: String,
}

impl AssignmentMessage {
    /// Render the notification for `change` on the given task.
    pub fn render(
        change: AssignmentChange,
        task_id: DbId,
        task_title: &str,
        project_id: DbId,
    ) -> Self {
        let (kind, title, message) = match change {
            AssignmentChange::Assigned(_) => (
                KIND_TASK_ASSIGNED,
                "New task assigned",
                format!("You have been assigned to task \"{task_title}\""),
            ),
            AssignmentChange::Reassigned(_) => (
                KIND_TASK_REASSIGNED,
                "Task reassigned",
                format!("Task \"{task_title}\" has been reassigned to you"),
            ),
        };

        Self {
            kind,
            title: title.to_string(),
            message,
            link: task_link(project_id, task_id),
        }
    }
}

/// Client deep link to a task.
pub fn task_link(project_id: DbId, task_id: DbId) -> String {
    format!("/projects/{project_id}/tasks/{task_id}")
}
