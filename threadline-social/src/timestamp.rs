//! Timestamp normalization to `DateTime<Utc>`.
//!
//! Two encodings arrive from providers: epoch milliseconds (LinkedIn) and
//! ISO-8601 strings with a trailing `Z` (Instagram). Both end up UTC-aware.
//! A missing millisecond field means the epoch; a missing or unparsable ISO
//! string is a [`NormalizeError::MalformedTimestamp`].
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::NormalizeError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The UTC epoch instant.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Convert epoch milliseconds to a UTC instant. `None` and `0` are the epoch.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use threadline_social::timestamp::from_epoch_millis;
///
/// let at = from_epoch_millis("postedAtTimestamp", Some(1_678_886_400_000)).unwrap();
/// assert_eq!(at, Utc.with_ymd_and_hms(2023, 3, 15, 13, 20, 0).unwrap());
/// assert_eq!(from_epoch_millis("postedAtTimestamp", None).unwrap().timestamp(), 0);
/// ```
pub fn from_epoch_millis(
    field: &'static str,
    millis: Option<i64>,
) -> Result<DateTime<Utc>, NormalizeError> {
    let ms = millis.unwrap_or(0);
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| NormalizeError::malformed(field, ms.to_string(), "epoch millis out of range"))
}

/// Parse an ISO-8601 string as UTC.
///
/// A trailing zone designator (`Z`) is stripped and the remainder read as a
/// UTC wall-clock time. Strings carrying an explicit numeric offset are
/// converted to UTC. A bare date is midnight UTC.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use threadline_social::timestamp::parse_iso8601;
///
/// let at = parse_iso8601("date_posted", Some("2023-03-15T14:00:00Z")).unwrap();
/// assert_eq!(at, Utc.with_ymd_and_hms(2023, 3, 15, 14, 0, 0).unwrap());
/// assert!(parse_iso8601("date_posted", Some("yesterday")).is_err());
/// assert!(parse_iso8601("date_posted", None).is_err());
/// ```
pub fn parse_iso8601(
    field: &'static str,
    raw: Option<&str>,
) -> Result<DateTime<Utc>, NormalizeError> {
    let Some(raw) = raw else {
        return Err(NormalizeError::malformed(field, "", "timestamp is missing"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::malformed(field, raw, "timestamp is empty"));
    }

    let naive_part = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(naive_part, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NormalizeError::malformed(field, raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_and_absent_millis_are_the_utc_epoch() {
        let zero = from_epoch_millis("ts", Some(0)).unwrap();
        let absent = from_epoch_millis("ts", None).unwrap();
        assert_eq!(zero, epoch());
        assert_eq!(absent, epoch());
        assert_eq!(zero.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn millis_keep_subsecond_precision() {
        let at = from_epoch_millis("ts", Some(1_678_890_000_250)).unwrap();
        assert_eq!(at.timestamp_subsec_millis(), 250);
        assert_eq!(at.timestamp(), 1_678_890_000);
    }

    #[test]
    fn out_of_range_millis_are_malformed() {
        let err = from_epoch_millis("ts", Some(i64::MAX)).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedTimestamp { field: "ts", .. }));
    }

    #[test]
    fn iso_with_and_without_designator_agree() {
        let z = parse_iso8601("d", Some("2023-03-16T15:00:00Z")).unwrap();
        let naive = parse_iso8601("d", Some("2023-03-16T15:00:00")).unwrap();
        assert_eq!(z, naive);
        assert_eq!(z, Utc.with_ymd_and_hms(2023, 3, 16, 15, 0, 0).unwrap());
    }

    #[test]
    fn iso_fractional_seconds() {
        let at = parse_iso8601("d", Some("2024-01-02T03:04:05.678Z")).unwrap();
        assert_eq!(at.timestamp_subsec_millis(), 678);
    }

    #[test]
    fn iso_with_offset_is_converted() {
        let at = parse_iso8601("d", Some("2023-03-15T16:00:00+02:00")).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2023, 3, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn bare_date_is_midnight() {
        let at = parse_iso8601("d", Some("2023-03-15")).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2023, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn malformed_iso_reports_field_and_value() {
        match parse_iso8601("date_of_comment", Some("15/03/2023")) {
            Err(NormalizeError::MalformedTimestamp { field, value, .. }) => {
                assert_eq!(field, "date_of_comment");
                assert_eq!(value, "15/03/2023");
            }
            other => panic!("expected malformed timestamp, got {other:?}"),
        }
    }
}
