//! Input validation shared by the registries and engines

use serde_json::Value;
use std::collections::BTreeSet;

use crate::models::Timestamp;
use crate::{AppError, AppResult};

/// Lowest accepted review rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted review rating
pub const MAX_RATING: i64 = 5;

/// Trim a text field and reject it when nothing is left
pub fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Parse one availability entry as an unsigned 64-bit timestamp
///
/// Accepts JSON unsigned integers and strings of decimal digits.
pub fn parse_timestamp(value: &Value) -> AppResult<Timestamp> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse::<u64>().ok()
            } else {
                None
            }
        }
        _ => None,
    };

    parsed.ok_or_else(|| {
        AppError::Validation(format!("invalid timestamp in availability: {}", value))
    })
}

/// Parse a whole availability list into a set, failing on the first bad entry
pub fn parse_availability(values: &[Value]) -> AppResult<BTreeSet<Timestamp>> {
    values.iter().map(parse_timestamp).collect()
}

/// Check a rating against the accepted range and narrow it
pub fn validate_rating(rating: i64) -> AppResult<u8> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(rating as u8)
}
