//! Business timezone helpers
//!
//! Date to timestamp conversion happens at the API layer; the store only
//! sees `i64` Unix millis.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Today in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Date + wall-clock time -> Unix millis (business timezone)
///
/// Falls back to UTC when the local time does not exist (DST gap).
pub fn date_time_to_millis(date: NaiveDate, time: NaiveTime, tz: Tz) -> i64 {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Day start (00:00:00) -> Unix millis (business timezone)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_time_to_millis(date, NaiveTime::MIN, tz)
}

/// Day end -> next day 00:00:00 Unix millis (business timezone)
///
/// Callers use `< end` (exclusive).
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_time_to_millis(next_day, NaiveTime::MIN, tz)
}

/// Format Unix millis in the business timezone, `None` when out of range
pub fn format_millis(ts: i64, tz: Tz, fmt: &str) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(ts)
        .map(|dt| dt.with_timezone(&tz).format(fmt).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-07-21").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 21).unwrap()
        );
        assert!(parse_date("21/07/2025").is_err());
    }

    #[test]
    fn test_day_bounds_in_sao_paulo() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 21).unwrap();
        // UTC-3, no DST since 2019
        assert_eq!(day_start_millis(date, Sao_Paulo), 1_753_066_800_000);
        assert_eq!(
            day_end_millis(date, Sao_Paulo) - day_start_millis(date, Sao_Paulo),
            86_400_000
        );
    }

    #[test]
    fn test_format_millis() {
        // 2025-07-21 05:28 UTC = 02:28 in Sao Paulo
        let ts = 1_753_075_680_000;
        assert_eq!(
            format_millis(ts, Sao_Paulo, "%d/%m/%Y %H:%M").as_deref(),
            Some("21/07/2025 02:28")
        );
    }
}
