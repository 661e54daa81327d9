//! Dense 5-minute bucket grid construction and accumulation.

use crate::error::StepsError;
use crate::pipeline::types::{BucketGrid, StepRecord, Window};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeMap;

const BUCKET_MINUTES: i64 = 5;
const BUCKETS_PER_DAY: usize = 24 * 12;

/// Sums filtered records into a gap-free 5-minute grid.
///
/// The grid walks whole calendar days bracketing the window rather than
/// clipping to the exact instants, so boundary days contribute all 288
/// buckets; the ones outside [start, end] stay at 0 because the filter
/// already removed their records.
pub fn aggregate(records: &[StepRecord], window: &Window) -> Result<BucketGrid, StepsError> {
    let mut buckets = BTreeMap::new();

    let mut day_start = window.start.date().and_time(NaiveTime::MIN);
    while day_start <= window.end {
        let mut key = day_start;
        for _ in 0..BUCKETS_PER_DAY {
            buckets.insert(key, 0i64);
            key += Duration::minutes(BUCKET_MINUTES);
        }
        day_start += Duration::days(1);
    }

    for record in records {
        let key = bucket_key(record.timestamp);
        match buckets.get_mut(&key) {
            Some(total) => *total += record.value,
            None => {
                return Err(StepsError::InternalConsistency {
                    timestamp: record.timestamp,
                    bucket: key,
                });
            }
        }
    }

    Ok(BucketGrid { buckets })
}

/// Truncates a timestamp to the start of its containing 5-minute bucket.
fn bucket_key(ts: NaiveDateTime) -> NaiveDateTime {
    let past_bucket = i64::from(ts.second()) + (i64::from(ts.minute()) % BUCKET_MINUTES) * 60;
    ts - Duration::seconds(past_bucket)
}
