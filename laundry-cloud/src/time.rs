//! Business timezone helpers
//!
//! All date → timestamp conversion happens at the handler/service layer;
//! repositories only receive `i64` Unix millis.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::closure::ClosureError;

/// Parse a YYYY-MM-DD date string
pub fn parse_date(field: &str, date: &str) -> Result<NaiveDate, ClosureError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| ClosureError::Parse {
        field: field.to_string(),
        value: date.to_string(),
    })
}

/// Today in the business timezone
pub fn business_today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Reject dates after `today`
pub fn validate_not_future(
    field: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ClosureError> {
    if date > today {
        return Err(ClosureError::Validation {
            field: field.to_string(),
            message: format!("{date} is in the future (today is {today})"),
        });
    }
    Ok(())
}

/// Local midnight of `date` → Unix millis.
///
/// DST gap fallback: if the local time does not exist, interpret it as UTC.
fn midnight_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of the business date (00:00 local) → Unix millis
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    midnight_millis(date, tz)
}

/// End of the business date → next day 00:00 local, Unix millis.
///
/// Callers use `< end` (exclusive).
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    midnight_millis(next_day, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("date", "2026-10-13").unwrap(), date("2026-10-13"));
        let err = parse_date("date", "13/10/2026").unwrap_err();
        assert_eq!(
            err,
            ClosureError::Parse {
                field: "date".to_string(),
                value: "13/10/2026".to_string(),
            }
        );
        assert!(parse_date("date", "2026-02-30").is_err());
    }

    #[test]
    fn test_madrid_day_bounds() {
        let tz = chrono_tz::Europe::Madrid;
        // CEST (UTC+2): 2026-07-01 00:00 local == 2026-06-30 22:00 UTC
        assert_eq!(day_start_millis(date("2026-07-01"), tz), 1_782_856_800_000);
        assert_eq!(
            day_end_millis(date("2026-07-01"), tz) - day_start_millis(date("2026-07-01"), tz),
            86_400_000
        );
    }

    #[test]
    fn test_dst_change_day_is_shorter() {
        let tz = chrono_tz::Europe::Madrid;
        // 2026-03-29: clocks jump from 02:00 to 03:00
        let start = day_start_millis(date("2026-03-29"), tz);
        let end = day_end_millis(date("2026-03-29"), tz);
        assert_eq!(end - start, 23 * 3_600_000);
    }

    #[test]
    fn test_utc_bounds() {
        let start = day_start_millis(date("1970-01-02"), chrono_tz::UTC);
        assert_eq!(start, 86_400_000);
        assert_eq!(day_end_millis(date("1970-01-02"), chrono_tz::UTC), 2 * 86_400_000);
    }

    #[test]
    fn test_validate_not_future() {
        let today = date("2026-10-14");
        assert!(validate_not_future("closing_date", date("2026-10-14"), today).is_ok());
        assert!(validate_not_future("closing_date", date("2026-10-01"), today).is_ok());
        assert!(matches!(
            validate_not_future("closing_date", date("2026-10-15"), today),
            Err(ClosureError::Validation { .. })
        ));
    }
}
