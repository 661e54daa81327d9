//! Restricts records to the requested window.

use crate::pipeline::types::{StepRecord, Window};

/// Keeps records with `start <= timestamp <= end`.
///
/// Both bounds are inclusive: the catalog over-selects files by one on
/// each side and this filter is what makes the window exact.
pub fn filter_window(records: Vec<StepRecord>, window: &Window) -> Vec<StepRecord> {
    records
        .into_iter()
        .filter(|r| window.start <= r.timestamp && r.timestamp <= window.end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::parse_timestamp;
    use chrono::{Duration, NaiveDateTime};

    fn ts(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    fn record(raw: &str) -> StepRecord {
        StepRecord {
            timestamp: ts(raw),
            value: 1,
        }
    }

    #[test]
    fn test_both_bounds_inclusive() {
        let window = Window::new(ts("2024-01-01T23:50"), ts("2024-01-02T00:10"));
        let records = vec![
            record("2024-01-01T23:50:00"),
            record("2024-01-02T00:10:00"),
            record("2024-01-01T23:49:59"),
        ];

        let kept = filter_window(records, &window);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].timestamp, window.start);
        assert_eq!(kept[1].timestamp, window.end);
    }

    #[test]
    fn test_one_second_past_end_is_excluded() {
        let window = Window::new(ts("2024-01-01T00:00"), ts("2024-01-01T12:00"));
        let at_end = StepRecord {
            timestamp: window.end,
            value: 1,
        };
        let past_end = StepRecord {
            timestamp: window.end + Duration::seconds(1),
            value: 1,
        };

        let kept = filter_window(vec![at_end, past_end], &window);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].timestamp, window.end);
    }
}
