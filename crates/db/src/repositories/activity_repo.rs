//! Repository for the `activity_logs` table (append-only).

use chrono::Utc;
use taskboard_core::types::DbId;

use crate::models::activity::{ActivityLog, ActivityWithUser, CreateActivity};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, user_id, kind, description, created_at";

/// Provides append and list operations for activity entries.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateActivity) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (task_id, user_id, kind, description, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List the activity of a task, newest first.
    pub async fn list_for_task(
        pool: &DbPool,
        task_id: DbId,
    ) -> Result<Vec<ActivityWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ActivityWithUser>(
            "SELECT a.id, a.task_id, a.user_id, a.kind, a.description, a.created_at,
                    u.name AS user_name
             FROM activity_logs a
             JOIN users u ON u.id = a.user_id
             WHERE a.task_id = $1
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Count entries of a given kind for a task.
    pub async fn count_for_task(pool: &DbPool, task_id: DbId, kind: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM activity_logs WHERE task_id = $1 AND kind = $2",
        )
        .bind(task_id)
        .bind(kind)
        .fetch_one(pool)
        .await
    }
}
