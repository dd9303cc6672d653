//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub team_leader_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. The owner is the acting user.
#[derive(Debug)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub team_leader_id: Option<DbId>,
}

/// Partial project update.
///
/// For `description` and `team_leader_id`, the outer `Option` says whether
/// the field was supplied and the inner one carries the new value or a clear.
#[derive(Debug, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub team_leader_id: Option<Option<DbId>>,
}
