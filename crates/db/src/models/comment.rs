//! Comment models.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub task_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}
