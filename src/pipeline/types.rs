//! Data types flowing through the aggregation pipeline.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// One candidate step file inside the export, with the point-in-time its
/// name carries (e.g. `steps-2024-01-01.json` -> 2024-01-01 00:00).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub date: NaiveDateTime,
}

/// One raw measurement, value already normalized to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    pub timestamp: NaiveDateTime,
    pub value: i64,
}

/// The inclusive [start, end] range requested by the caller.
///
/// Invariant: `start <= end`. Captured once at run start and treated as
/// immutable for the run's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }
}

/// Dense 5-minute grid keyed by bucket start time.
///
/// Holds one entry for every 5-minute interval of every calendar day the
/// window touches, so iteration order is chronological and gap-free.
#[derive(Debug, Default)]
pub struct BucketGrid {
    pub(crate) buckets: BTreeMap<NaiveDateTime, i64>,
}

impl BucketGrid {
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &i64)> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket totals.
    pub fn grand_total(&self) -> i64 {
        self.buckets.values().sum()
    }

    pub fn get(&self, key: &NaiveDateTime) -> Option<i64> {
        self.buckets.get(key).copied()
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    // the format actual Fitbit Takeout step files use
    "%m/%d/%y %H:%M:%S",
];

/// Parses the timestamp shapes seen in export file names, record
/// `dateTime` fields, and CLI arguments. A bare date anchors to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(23, 52, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2024-01-02T23:52:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T23:52"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02 23:52:00"), Some(expected));
        assert_eq!(parse_timestamp("01/02/24 23:52:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-02T23:52 "), Some(expected));
    }

    #[test]
    fn test_parse_bare_date_anchors_to_midnight() {
        let ts = parse_timestamp("2024-01-02").unwrap();
        assert_eq!(ts.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
