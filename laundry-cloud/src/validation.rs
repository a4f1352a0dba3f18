//! Input validation helpers
//!
//! Text length limits, cash amount bounds and list paging bounds.

use rust_decimal::Decimal;

use crate::closure::ClosureError;

/// Closure notes
pub const MAX_NOTE_LEN: usize = 500;

/// Default page size for list endpoints
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard cap for list page size
pub const MAX_LIST_LIMIT: i64 = 200;

/// Largest amount a `NUMERIC(12,2)` money column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Validate that an optional string, if present, is within the length limit (in characters).
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ClosureError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(ClosureError::Validation {
            field: field.to_string(),
            message: format!("is too long ({} chars, max {max_len})", v.chars().count()),
        });
    }
    Ok(())
}

/// Validate that a cash amount is not negative
pub fn validate_non_negative(value: Decimal, field: &str) -> Result<(), ClosureError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ClosureError::Validation {
            field: field.to_string(),
            message: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

/// Validate that an amount fits the money columns
pub fn validate_max_amount(value: Decimal, field: &str) -> Result<(), ClosureError> {
    if value > MAX_AMOUNT {
        return Err(ClosureError::Validation {
            field: field.to_string(),
            message: format!("must not exceed {MAX_AMOUNT}, got {value}"),
        });
    }
    Ok(())
}

/// Validate a user-entered cash amount: non-negative and storable
pub fn validate_cash_amount(value: Decimal, field: &str) -> Result<(), ClosureError> {
    validate_non_negative(value, field)?;
    validate_max_amount(value, field)
}

/// Clamp list paging parameters
pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text_limit() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(500)), "notes", MAX_NOTE_LEN).is_ok());
        // multi-byte characters count once
        assert!(validate_optional_text(&Some("ñ".repeat(500)), "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(501)), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO, "counted_cash").is_ok());
        assert!(validate_non_negative(Decimal::new(-0, 2), "counted_cash").is_ok());
        assert!(validate_non_negative(Decimal::new(1000, 2), "counted_cash").is_ok());
        assert!(matches!(
            validate_non_negative(Decimal::new(-1, 2), "counted_cash"),
            Err(ClosureError::Validation { field, .. }) if field == "counted_cash"
        ));
    }

    #[test]
    fn test_max_amount_matches_column() {
        assert_eq!(MAX_AMOUNT, Decimal::new(999_999_999_999, 2));
        assert_eq!(MAX_AMOUNT.to_string(), "9999999999.99");
    }

    #[test]
    fn test_cash_amount_upper_bound() {
        assert!(validate_cash_amount(MAX_AMOUNT, "opening_cash").is_ok());
        assert!(matches!(
            validate_cash_amount(Decimal::new(1_000_000_000_000, 2), "opening_cash"),
            Err(ClosureError::Validation { field, .. }) if field == "opening_cash"
        ));
        assert!(matches!(
            validate_cash_amount(Decimal::MAX, "counted_cash"),
            Err(ClosureError::Validation { field, .. }) if field == "counted_cash"
        ));
        assert!(validate_cash_amount(Decimal::new(-1, 2), "counted_cash").is_err());
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(None, None), (50, 0));
        assert_eq!(page_bounds(Some(1000), Some(10)), (200, 10));
        assert_eq!(page_bounds(Some(0), Some(-5)), (1, 0));
    }
}
