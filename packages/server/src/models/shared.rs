use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::AppError;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trim an optional value, mapping blank strings to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate that a text field is non-blank, returning it trimmed.
pub fn require_text(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("Field '{field}' is required")));
    }
    Ok(trimmed.to_string())
}

/// Parse a price as a plain decimal number: optional sign, digits, optional
/// fraction. Anything else is rejected before it can reach a
/// `CAST(... AS DECIMAL)` in the store.
pub fn parse_price(raw: &str) -> Result<Decimal, AppError> {
    let invalid = || AppError::Validation(format!("Price '{raw}' is not a valid number"));
    let trimmed = raw.trim();

    if !is_plain_decimal(trimmed) {
        return Err(invalid());
    }
    Decimal::from_str(trimmed).map_err(|_| invalid())
}

fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    (!int.is_empty() || !frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}
