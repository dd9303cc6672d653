//! Task vocabulary and input rules.
//!
//! Status transitions are unconstrained: any status may follow any other,
//! including backwards moves and `Todo -> Done` directly. The only rules
//! enforced here are that values come from the fixed vocabularies and that
//! assignee references are well-formed ids.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum task title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Todo")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Stored and serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Parse a stored or user-supplied status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Expected one of: Todo, In Progress, Done"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Relative urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{value}'. Expected one of: Low, Medium, High"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a task title and return it trimmed.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Task title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Task title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Interpret a raw `assigneeId` JSON value.
///
/// `null` and the empty string mean "no assignee". Integers and numeric
/// strings are user ids. Anything else is rejected.
pub fn parse_assignee(value: &serde_json::Value) -> Result<Option<DbId>, CoreError> {
    let invalid = || CoreError::Validation("assigneeId must be a numeric user id".into());

    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<DbId>().map(Some).map_err(|_| invalid())
            }
        }
        serde_json::Value::Number(n) => n.as_i64().map(Some).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Assignee part of a partial task update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssigneeUpdate {
    /// Field absent from the request: keep the current assignee.
    #[default]
    Unchanged,
    /// Field present: replace the assignee (`None` clears it).
    Set(Option<DbId>),
}

impl AssigneeUpdate {
    /// Build from an optional raw JSON field, where `None` means the field
    /// was not sent at all.
    pub fn from_field(field: Option<&serde_json::Value>) -> Result<Self, CoreError> {
        match field {
            None => Ok(AssigneeUpdate::Unchanged),
            Some(value) => parse_assignee(value).map(AssigneeUpdate::Set),
        }
    }

    /// The assignee id this update writes, if it writes a non-empty one.
    pub fn target(self) -> Option<DbId> {
        match self {
            AssigneeUpdate::Set(id) => id,
            AssigneeUpdate::Unchanged => None,
        }
    }

    /// Resolve against the current assignee.
    pub fn resolve(self, current: Option<DbId>) -> Option<DbId> {
        match self {
            AssigneeUpdate::Unchanged => current,
            AssigneeUpdate::Set(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Assignment transitions
// ---------------------------------------------------------------------------

/// An assignment transition that warrants notifying the new assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentChange {
    /// The task was created with an assignee.
    Assigned(DbId),
    /// An update moved the task to a different, non-empty assignee.
    Reassigned(DbId),
}

impl AssignmentChange {
    pub fn recipient(self) -> DbId {
        match self {
            AssignmentChange::Assigned(id) | AssignmentChange::Reassigned(id) => id,
        }
    }

    /// Transition produced by creating a task.
    pub fn on_create(assignee: Option<DbId>) -> Option<Self> {
        assignee.map(AssignmentChange::Assigned)
    }

    /// Transition produced by an update from `previous` to `next`.
    ///
    /// Clearing the assignee or re-setting the same one yields `None`.
    pub fn on_update(previous: Option<DbId>, next: Option<DbId>) -> Option<Self> {
        match next {
            Some(id) if previous != Some(id) => Some(AssignmentChange::Reassigned(id)),
            _ => None,
        }
    }
}
