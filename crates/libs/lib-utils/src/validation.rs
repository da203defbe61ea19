//! # Validation Utilities
//!
//! Input validation helpers for forms and CLI arguments.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate that a value carries no whitespace (header values, identifiers).
pub fn validate_no_whitespace(value: &str, field_name: &str) -> Result<(), String> {
    if value.chars().any(char::is_whitespace) {
        Err(format!("{} must not contain whitespace", field_name))
    } else {
        Ok(())
    }
}
