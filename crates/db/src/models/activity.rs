//! Activity log models.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// An activity entry joined with the acting user's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: ActivityLog,
    pub user_name: String,
}

/// DTO for appending an activity entry.
#[derive(Debug)]
pub struct CreateActivity {
    pub task_id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub description: String,
}
