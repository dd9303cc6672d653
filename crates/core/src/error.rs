//! Domain error taxonomy.
//!
//! Each variant corresponds to one HTTP status in the API crate. Storage
//! and infrastructure failures are not represented here; they stay in the
//! layer that produced them.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row with this id, or the row is hidden (for example a trashed task).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The write would break a uniqueness or ownership rule.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No usable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Project",
            id: 4,
        };
        assert_eq!(err.to_string(), "Project with id 4 not found");
    }
}
