//! Refresh-token session model.

use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSession {
    /// Whether the session can still be exchanged at `now`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

/// DTO for inserting a session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
