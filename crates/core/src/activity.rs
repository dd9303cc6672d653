//! Activity log vocabulary.
//!
//! Activity entries are append-only. The `comment` kind is written in the
//! same transaction as the comment itself; the task lifecycle kinds are
//! recorded from domain events.

use crate::error::CoreError;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LEN: usize = 5000;

pub const KIND_COMMENT: &str = "comment";
pub const KIND_CREATED: &str = "created";
pub const KIND_UPDATED: &str = "updated";
pub const KIND_ASSIGNED: &str = "assigned";
pub const KIND_DELETED: &str = "deleted";
pub const KIND_RESTORED: &str = "restored";

/// Human-readable description for an activity entry on `task_title`.
pub fn describe(kind: &str, task_title: &str) -> String {
    match kind {
        KIND_COMMENT => format!("commented on \"{task_title}\""),
        KIND_CREATED => format!("created \"{task_title}\""),
        KIND_UPDATED => format!("updated \"{task_title}\""),
        KIND_ASSIGNED => format!("assigned \"{task_title}\""),
        KIND_DELETED => format!("moved \"{task_title}\" to trash"),
        KIND_RESTORED => format!("restored \"{task_title}\""),
        other => format!("{other} \"{task_title}\""),
    }
}

/// Validate comment text and return it trimmed.
pub fn validate_comment_content(content: &str) -> Result<String, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Comment content is required".into()));
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
