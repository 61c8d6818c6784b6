use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Why a speech date could not be turned into a comparable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateIssue {
    Missing,
    Unparseable(String),
}

impl fmt::Display for DateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateIssue::Missing => write!(f, "speech date is missing"),
            DateIssue::Unparseable(value) => {
                write!(f, "speech date '{}' is not a comparable date", value)
            }
        }
    }
}

/// Parses the textual date forms found in politician exports.
///
/// RFC 3339 values are converted to UTC, naive timestamps are taken as-is and
/// bare calendar dates resolve to midnight. Returns `None` for blank or
/// unrecognised input.
pub fn parse_speech_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

pub(crate) fn resolve_text(value: &str) -> Result<NaiveDateTime, DateIssue> {
    if value.trim().is_empty() {
        return Err(DateIssue::Missing);
    }

    parse_speech_timestamp(value).ok_or_else(|| DateIssue::Unparseable(value.to_string()))
}

pub(crate) fn resolve_millis(millis: i64) -> Result<NaiveDateTime, DateIssue> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| DateIssue::Unparseable(millis.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_rfc3339_naive_and_calendar_forms() {
        assert_eq!(
            parse_speech_timestamp("2021-06-15T10:00:00+02:00"),
            Some(at(2021, 6, 15, 8, 0))
        );
        assert_eq!(
            parse_speech_timestamp("2021-06-15T10:30:00"),
            Some(at(2021, 6, 15, 10, 30))
        );
        assert_eq!(
            parse_speech_timestamp("2021-06-15 10:30:00.250")
                .map(|dt| dt.format("%H:%M:%S%.3f").to_string()),
            Some("10:30:00.250".to_string())
        );
        assert_eq!(
            parse_speech_timestamp(" 2021-06-15 "),
            Some(at(2021, 6, 15, 0, 0))
        );
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(parse_speech_timestamp("   ").is_none());
        assert!(parse_speech_timestamp("15/06/2021").is_none());
        assert!(parse_speech_timestamp("2021-02-30").is_none());
    }

    #[test]
    fn resolve_text_distinguishes_missing_from_unparseable() {
        assert_eq!(resolve_text(""), Err(DateIssue::Missing));
        assert_eq!(
            resolve_text("yesterday"),
            Err(DateIssue::Unparseable("yesterday".to_string()))
        );
    }

    #[test]
    fn resolve_millis_reads_epoch_milliseconds() {
        assert_eq!(resolve_millis(1_623_715_200_000), Ok(at(2021, 6, 15, 0, 0)));
        assert!(resolve_millis(i64::MAX).is_err());
    }
}
