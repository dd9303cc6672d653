//! Project membership models.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A member joined with their user record and role flags.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub joined_at: Timestamp,
    pub is_owner: bool,
    pub is_team_leader: bool,
}
