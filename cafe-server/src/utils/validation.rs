//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits exist because SQLite TEXT has no built-in length enforcement;
//! values are chosen as reasonable UX limits for names, notes and contact
//! fields.

use shared::AppError;

// ====== Text length limits ======

/// Entity names: customer, category, menu item, display name
pub const MAX_NAME_LEN: usize = 200;

/// Order notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: username, phone, transaction id
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ====== Validation helpers ======

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
