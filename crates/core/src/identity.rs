//! User identity rules: email and display-name validation.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum display name length in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Canonical form of an email address used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an email address and return its canonical form.
pub fn validate_email(email: &str) -> Result<String, CoreError> {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !normalized.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{normalized}' is not a valid email address"
        )));
    }
    Ok(normalized)
}

/// Validate a display name and return it trimmed.
pub fn validate_display_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
