//! Repository for the `tasks` table.
//!
//! Tasks are soft-deleted: `deleted_at` marks a task as trashed and every
//! read except [`TaskRepo::find_including_deleted`] and
//! [`TaskRepo::list_trash`] filters trashed rows out.

use chrono::Utc;
use taskboard_core::task::AssigneeUpdate;
use taskboard_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskCounts, TaskPatch, TaskWithAssignee};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, priority, assignee_id, \
                       deleted_at, created_at, updated_at";

/// Task columns joined with the assignee's name and email. Expects the
/// `tasks t LEFT JOIN users u` aliasing.
const JOINED_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.status, t.priority, \
                              t.assignee_id, t.deleted_at, t.created_at, t.updated_at, \
                              u.name AS assignee_name, u.email AS assignee_email";

/// Provides CRUD and soft-delete operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, status, priority, assignee_id,
                                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.assignee_id)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by ID, including soft-deleted rows.
    pub async fn find_including_deleted(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted task together with its assignee details.
    pub async fn find_detail(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t LEFT JOIN users u ON u.id = t.assignee_id
             WHERE t.id = $1 AND t.deleted_at IS NULL"
        );
        sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the non-deleted tasks of a project, newest first.
    pub async fn list_by_project(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t LEFT JOIN users u ON u.id = t.assignee_id
             WHERE t.project_id = $1 AND t.deleted_at IS NULL
             ORDER BY t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the soft-deleted tasks of a project, most recently deleted first.
    pub async fn list_trash(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t LEFT JOIN users u ON u.id = t.assignee_id
             WHERE t.project_id = $1 AND t.deleted_at IS NOT NULL
             ORDER BY t.deleted_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to a non-deleted task.
    ///
    /// Returns `None` if the task does not exist or is in the trash.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, sqlx::Error> {
        let assignee = match patch.assignee {
            AssigneeUpdate::Unchanged => None,
            AssigneeUpdate::Set(value) => Some(value),
        };
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                assignee_id = CASE WHEN $7 THEN $8 ELSE assignee_id END,
                updated_at = $9
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(patch.description.is_some())
            .bind(patch.description.clone().flatten())
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.priority.map(|p| p.as_str()))
            .bind(assignee.is_some())
            .bind(assignee.flatten())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a task. Returns `true` if a row was moved to the trash.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted task. Returns `true` if a row was restored.
    ///
    /// Other fields, including `updated_at`, are left as they were.
    pub async fn restore(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the non-deleted tasks of a project by status, by priority, and
    /// without an assignee.
    pub async fn counts(pool: &DbPool, project_id: DbId) -> Result<TaskCounts, sqlx::Error> {
        let by_status = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM tasks
             WHERE project_id = $1 AND deleted_at IS NULL
             GROUP BY status",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        let by_priority = sqlx::query_as::<_, (String, i64)>(
            "SELECT priority, COUNT(*) FROM tasks
             WHERE project_id = $1 AND deleted_at IS NULL
             GROUP BY priority",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        let unassigned = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks
             WHERE project_id = $1 AND deleted_at IS NULL AND assignee_id IS NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(TaskCounts {
            by_status,
            by_priority,
            unassigned,
        })
    }
}
