//! Repository for the `comments` table (append-only).

use chrono::Utc;
use taskboard_core::activity::KIND_COMMENT;
use taskboard_core::types::DbId;

use crate::models::comment::CommentWithAuthor;
use crate::DbPool;

/// Comment columns joined with the author's name. Expects the
/// `comments c JOIN users u` aliasing.
const JOINED_COLUMNS: &str =
    "c.id, c.task_id, c.author_id, u.name AS author_name, c.content, c.created_at";

/// Provides comment operations.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and its `comment` activity entry in one transaction,
    /// returning the comment with its author's name.
    pub async fn create_with_activity(
        pool: &DbPool,
        task_id: DbId,
        author_id: DbId,
        content: &str,
        activity_description: &str,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let comment_id: DbId = sqlx::query_scalar(
            "INSERT INTO comments (task_id, author_id, content, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(task_id)
        .bind(author_id)
        .bind(content)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO activity_logs (task_id, user_id, kind, description, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(task_id)
        .bind(author_id)
        .bind(KIND_COMMENT)
        .bind(activity_description)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c JOIN users u ON u.id = c.author_id
             WHERE c.id = $1"
        );
        let comment = sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(comment_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    /// List the comments of a task, newest first.
    pub async fn list_for_task(
        pool: &DbPool,
        task_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c JOIN users u ON u.id = c.author_id
             WHERE c.task_id = $1
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}
