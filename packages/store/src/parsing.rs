//! Cell parsing for hotspot CSV files.
//!
//! Date and numeric parsing shared by the loader. Each function returns
//! `None` for a value it cannot interpret and leaves the decision of whether
//! that is fatal to the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime layouts seen in the upstream hotspot feeds, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a `rep_date` cell into a datetime.
///
/// Accepts the layouts in [`DATETIME_FORMATS`], RFC 3339 (the offset is
/// dropped and the local wall-clock time kept), and the date-only layouts in
/// [`DATE_FORMATS`].
#[must_use]
pub fn parse_rep_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a severity metric cell. Returns `None` if empty, non-numeric, or
/// not finite.
#[must_use]
pub fn parse_metric(s: &str) -> Option<f64> {
    let value = s.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parses a latitude or longitude cell. Returns `None` if the value is not a
/// finite number.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    parse_metric(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_datetime() {
        let dt = parse_rep_date("2024-01-15 14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_datetime_with_fractional_seconds() {
        let dt = parse_rep_date("2024/01/15 14:30:00.000").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_iso_t_separator() {
        let dt = parse_rep_date("2024-01-15T14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_rfc3339_keeping_wall_clock() {
        let dt = parse_rep_date("2024-01-15T23:30:00-06:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 23:30:00");
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_rep_date("2024-01-15").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_rep_date("not-a-date").is_none());
        assert!(parse_rep_date("").is_none());
        assert!(parse_rep_date("2024-13-40").is_none());
    }

    #[test]
    fn metric_missing_values() {
        assert_eq!(parse_metric(" 12.5 "), Some(12.5));
        assert_eq!(parse_metric(""), None);
        assert_eq!(parse_metric("NaN"), None);
        assert_eq!(parse_metric("inf"), None);
        assert_eq!(parse_metric("n/a"), None);
    }

    #[test]
    fn coordinate_parsing() {
        let lat = parse_coordinate("54.2163").unwrap();
        assert!((lat - 54.2163).abs() < f64::EPSILON);
        assert!(parse_coordinate("north").is_none());
    }
}
