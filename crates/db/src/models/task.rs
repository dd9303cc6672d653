//! Task entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::task::{AssigneeUpdate, TaskPriority, TaskStatus};
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
///
/// `status` and `priority` hold the display strings of
/// [`TaskStatus`] and [`TaskPriority`]; the table constrains them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// In the trash.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A task joined with its assignee's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithAssignee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
}

/// Validated input for inserting a task.
#[derive(Debug)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<DbId>,
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: AssigneeUpdate,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee == AssigneeUpdate::Unchanged
    }
}

/// Raw per-project counts feeding the stats report.
#[derive(Debug, Clone, Default)]
pub struct TaskCounts {
    pub by_status: Vec<(String, i64)>,
    pub by_priority: Vec<(String, i64)>,
    pub unassigned: i64,
}
