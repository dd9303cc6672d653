//! Project membership rules.
//!
//! Every project has exactly one owner and at most one team leader. Both
//! may manage the member list; only the owner may change or delete the
//! project itself. The owner can never be removed from the member list.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum project name length in characters.
pub const MAX_PROJECT_NAME_LEN: usize = 120;

/// Validate a project name and return it trimmed.
pub fn validate_project_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Project name is required".into()));
    }
    if trimmed.chars().count() > MAX_PROJECT_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_PROJECT_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// The users holding elevated rights on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAuthority {
    pub owner_id: DbId,
    pub team_leader_id: Option<DbId>,
}

impl ProjectAuthority {
    pub fn new(owner_id: DbId, team_leader_id: Option<DbId>) -> Self {
        Self {
            owner_id,
            team_leader_id,
        }
    }

    pub fn is_owner(&self, user_id: DbId) -> bool {
        self.owner_id == user_id
    }

    pub fn is_team_leader(&self, user_id: DbId) -> bool {
        self.team_leader_id == Some(user_id)
    }

    /// Owner or team leader.
    pub fn can_manage_members(&self, user_id: DbId) -> bool {
        self.is_owner(user_id) || self.is_team_leader(user_id)
    }

    pub fn ensure_can_manage_members(&self, user_id: DbId) -> Result<(), CoreError> {
        if self.can_manage_members(user_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the project owner or team leader can manage members".into(),
            ))
        }
    }

    pub fn ensure_owner(&self, user_id: DbId) -> Result<(), CoreError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the project owner can modify this project".into(),
            ))
        }
    }

    /// Reject removal of the owner's membership.
    pub fn ensure_removable(&self, member_id: DbId) -> Result<(), CoreError> {
        if self.is_owner(member_id) {
            Err(CoreError::Conflict(
                "The project owner cannot be removed from the project".into(),
            ))
        } else {
            Ok(())
        }
    }
}
