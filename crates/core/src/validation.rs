//! Shared input validators for reference and aggregate records.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length for name-like fields (names, codes, locations).
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for free-text fields (descriptions, reasons, notes).
pub const MAX_TEXT_LEN: usize = 2_000;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate that a required field is non-blank.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a name-like field: required and within length limits.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), CoreError> {
    validate_required(field, value)?;
    if value.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a free-text field is within length limits. Empty is allowed.
pub fn validate_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.len() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate that a counter-like field is not negative.
pub fn validate_non_negative(field: &'static str, value: i32) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate article stock bounds: non-negative levels and, when a maximum is
/// configured, `stock_max >= stock_min`.
pub fn validate_stock_levels(
    stock_current: i32,
    stock_min: i32,
    stock_max: Option<i32>,
) -> Result<(), CoreError> {
    validate_non_negative("stock_current", stock_current)?;
    validate_non_negative("stock_min", stock_min)?;
    if let Some(max) = stock_max {
        validate_non_negative("stock_max", max)?;
        if max < stock_min {
            return Err(CoreError::Validation(format!(
                "stock_max ({max}) must be greater than or equal to stock_min ({stock_min})"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
