//! Server timestamps arrive either as RFC 3339 strings or as naive local
//! date-times (`2025-03-01T10:30:00`). They are kept as strings on the DTOs
//! and parsed here when a page needs to compare or display them.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a server timestamp into local wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| parse_date(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Parses an ISO date, tolerating a trailing time component.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let datePart = value.trim().get(..10)?;
    NaiveDate::parse_from_str(datePart, "%Y-%m-%d").ok()
}

pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(ts) => ts.format("%d %b %Y, %H:%M").to_string(),
        None => value.to_string(),
    }
}

pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => value.to_string(),
    }
}

/// Like [`format_date`] for optional fields, rendering `-` when absent.
pub fn format_optional_date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_else(|| "-".to_string())
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_and_short_forms() {
        let ts = parse_timestamp("2025-03-01T10:30:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 10:30");

        let short = parse_timestamp("2025-03-01T10:30").unwrap();
        assert_eq!(short, ts);

        let fractional = parse_timestamp("2025-03-01T10:30:00.123456").unwrap();
        assert_eq!(fractional.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2025-03-01T10:30:00Z").is_some());
        assert!(parse_timestamp("2025-03-01T10:30:00+01:00").is_some());
    }

    #[test]
    fn date_only_values_parse_as_midnight() {
        let ts = parse_timestamp("2025-12-24").unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "00:00");
        assert_eq!(parse_date("2025-12-24T08:00:00").unwrap().to_string(), "2025-12-24");
    }

    #[test]
    fn unparseable_values_are_shown_verbatim() {
        assert_eq!(format_timestamp("soon"), "soon");
        assert_eq!(format_date("n/a"), "n/a");
        assert_eq!(format_optional_date(None), "-");
        assert_eq!(format_date("2025-01-05"), "05 Jan 2025");
    }
}
