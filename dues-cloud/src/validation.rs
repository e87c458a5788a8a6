//! Input validation helpers
//!
//! Runs before any store mutation, so a rejected payload never leaves a
//! partial write behind.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Names: members, fee event titles, teams, categories
pub const MAX_NAME_LEN: usize = 200;

/// Notes on fee events, payments and expenses
pub const MAX_NOTE_LEN: usize = 500;

/// Short fields: furigana, position, contact, registrant
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Postal addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Amount limits ───────────────────────────────────────────────────

/// Largest single fee or expense amount (yen)
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field));
    }
    validate_len(value, field, max_len)
}

/// Validate that a string is within the length limit (empty allowed).
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_len(v, field, max_len)?;
    }
    Ok(())
}

/// Validate that an optional string, if present, is non-empty and within the limit.
pub fn validate_optional_required_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_required_text(v, field, max_len)?;
    }
    Ok(())
}

/// Validate a money amount (yen, `0..=MAX_AMOUNT`).
///
/// A negative amount fails with `code`; one above [`MAX_AMOUNT`] with
/// `ValueOutOfRange`.
pub fn validate_amount(amount: i64, field: &str, code: ErrorCode) -> Result<(), AppError> {
    if amount < 0 {
        return Err(
            AppError::with_message(code, format!("{field} must not be negative"))
                .with_detail("field", field)
                .with_detail("value", amount),
        );
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds {MAX_AMOUNT}"),
        )
        .with_detail("field", field)
        .with_detail("value", amount));
    }
    Ok(())
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        )
        .with_detail("field", field));
    }
    Ok(())
}
