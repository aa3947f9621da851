//! Calendar conversions for close-approach timestamps.
//!
//! Close-approach data carries times like `2020-Jan-01 12:30` (UTC). They are
//! parsed into naive date-times and written back out as `2020-01-01 12:30`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const CD_DATE_FORMAT: &str = "%Y-%b-%d";
const CD_TIME_FORMAT: &str = "%H:%M";
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a close-approach calendar date such as `2020-Jan-01 12:30`.
///
/// The month abbreviation is matched case-insensitively. The minutes may be
/// omitted (`2020-Jan-01 12`) and so may the whole time of day, which then
/// defaults to midnight. Anything else yields `None`.
pub fn parse_cd(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let (date_part, time_part) = match s.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (s, None),
    };

    let date = NaiveDate::parse_from_str(date_part, CD_DATE_FORMAT).ok()?;
    let time = match time_part {
        None => NaiveTime::MIN,
        Some(t) if t.contains(':') => NaiveTime::parse_from_str(t, CD_TIME_FORMAT).ok()?,
        Some(t) => NaiveTime::from_hms_opt(t.parse().ok()?, 0, 0)?,
    };

    Some(date.and_time(time))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hm(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_full_timestamp() {
        assert_eq!(parse_cd("1900-Jan-01 00:11"), Some(ymd_hm(1900, 1, 1, 0, 11)));
        assert_eq!(parse_cd("2020-Dec-31 23:59"), Some(ymd_hm(2020, 12, 31, 23, 59)));
    }

    #[test]
    fn test_parse_month_is_case_insensitive() {
        assert_eq!(parse_cd("2020-JAN-05 10:00"), Some(ymd_hm(2020, 1, 5, 10, 0)));
        assert_eq!(parse_cd("2020-jan-05 10:00"), Some(ymd_hm(2020, 1, 5, 10, 0)));
    }

    #[test]
    fn test_parse_without_minutes() {
        assert_eq!(parse_cd("2021-Mar-14 07"), Some(ymd_hm(2021, 3, 14, 7, 0)));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_cd("2021-Mar-14"), Some(ymd_hm(2021, 3, 14, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_cd(""), None);
        assert_eq!(parse_cd("not a date"), None);
        assert_eq!(parse_cd("2020-01-01 10:00"), None);
        assert_eq!(parse_cd("2020-Feb-30 10:00"), None);
        assert_eq!(parse_cd("2020-Jan-01 25:00"), None);
        assert_eq!(parse_cd("2020-Jan-01 xx"), None);
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&ymd_hm(2020, 1, 1, 12, 30)), "2020-01-01 12:30");
        assert_eq!(format_datetime(&ymd_hm(1900, 12, 4, 0, 5)), "1900-12-04 00:05");
    }
}
