//! Conversion of wall-clock times into fractional hours of day.
//!
//! All curve math works on `f64` hours in `[0, 24)`. This module owns the
//! conversion from `chrono` time values and the single-step correction applied
//! to the current time before phase selection.

use chrono::{NaiveTime, Timelike};

use crate::constants::{HOURS_IN_DAY, MINUTES_PER_HOUR, SECONDS_PER_HOUR};

/// Convert a time of day into fractional hours.
///
/// Only hour, minute and second are used; sub-second precision is dropped.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use daylightr::time_of_day::hours_of_day;
/// let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
/// assert_eq!(hours_of_day(&t), 7.5);
/// ```
pub fn hours_of_day<T: Timelike>(time: &T) -> f64 {
    f64::from(time.hour())
        + f64::from(time.minute()) / MINUTES_PER_HOUR
        + f64::from(time.second()) / SECONDS_PER_HOUR
}

/// Correct the current time before it enters phase selection.
///
/// Negative values clamp to midnight. Values at or past 24h are pulled back by
/// a single day, which absorbs leap seconds and `24:00` without pretending to
/// be a general modulo; `49.0` becomes `25.0`, not `1.0`.
pub fn normalize_now(hours: f64) -> f64 {
    if hours < 0.0 {
        0.0
    } else if hours >= HOURS_IN_DAY {
        hours - HOURS_IN_DAY
    } else {
        hours
    }
}

/// Parse a user supplied time of day in `HH:MM:SS` or `HH:MM` form.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM:SS or HH:MM", value))
}

/// Format fractional hours as `HH:MM` for display.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * MINUTES_PER_HOUR).round() as i64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_of_day_components() {
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(hours_of_day(&t), 0.0);

        let t = NaiveTime::from_hms_opt(20, 15, 0).unwrap();
        assert_eq!(hours_of_day(&t), 20.25);

        let t = NaiveTime::from_hms_opt(1, 0, 36).unwrap();
        assert!((hours_of_day(&t) - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_hours_of_day_end_of_day() {
        let t = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        let hours = hours_of_day(&t);
        assert!(hours < HOURS_IN_DAY);
        assert!(hours > 23.99);
    }

    #[test]
    fn test_normalize_now_passthrough() {
        assert_eq!(normalize_now(0.0), 0.0);
        assert_eq!(normalize_now(12.75), 12.75);
        assert_eq!(normalize_now(23.999), 23.999);
    }

    #[test]
    fn test_normalize_now_clamps_negative() {
        assert_eq!(normalize_now(-0.001), 0.0);
        assert_eq!(normalize_now(-5.0), 0.0);
    }

    #[test]
    fn test_normalize_now_collapses_midnight_once() {
        assert_eq!(normalize_now(24.0), 0.0);
        assert_eq!(normalize_now(normalize_now(24.0)), 0.0);
        assert!((normalize_now(24.0003) - 0.0003).abs() < 1e-12);
        // Single correction only
        assert_eq!(normalize_now(49.0), 25.0);
    }

    #[test]
    fn test_parse_time_of_day_formats() {
        assert_eq!(
            parse_time_of_day("07:00:00"),
            Ok(NaiveTime::from_hms_opt(7, 0, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day(" 19:45 "),
            Ok(NaiveTime::from_hms_opt(19, 45, 0).unwrap())
        );
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("sunrise").is_err());
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.0), "00:00");
        assert_eq!(format_hours(7.5), "07:30");
        assert_eq!(format_hours(23.99), "23:59");
    }
}
