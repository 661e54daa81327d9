//! Reads selected step files and parses their records.

use crate::archive::ArchiveReader;
use crate::error::StepsError;
use crate::pipeline::types::{SourceEntry, StepRecord, parse_timestamp};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "dateTime")]
    date_time: String,
    value: serde_json::Value,
}

/// Loads and parses every selected entry, concatenating records in file
/// order, then each file's own order.
///
/// Any read or parse failure aborts the whole run naming the entry; there
/// is no partial result.
pub async fn load_records(
    reader: &dyn ArchiveReader,
    selected: &[SourceEntry],
) -> Result<Vec<StepRecord>, StepsError> {
    let mut records = Vec::new();

    for entry in selected {
        let text = reader
            .read_text(&entry.name)
            .await
            .map_err(|source| StepsError::EntryReadFailure {
                name: entry.name.clone(),
                source,
            })?;

        let raw: Vec<RawRecord> =
            serde_json::from_str(&text).map_err(|e| StepsError::EntryParseFailure {
                name: entry.name.clone(),
                reason: e.to_string(),
            })?;

        debug!(name = %entry.name, records = raw.len(), "Parsed step file");

        for r in raw {
            let timestamp =
                parse_timestamp(&r.date_time).ok_or_else(|| StepsError::EntryParseFailure {
                    name: entry.name.clone(),
                    reason: format!("unparseable dateTime {:?}", r.date_time),
                })?;
            let value =
                normalize_value(&r.value).ok_or_else(|| StepsError::EntryParseFailure {
                    name: entry.name.clone(),
                    reason: format!("non-numeric value {}", r.value),
                })?;
            records.push(StepRecord { timestamp, value });
        }
    }

    Ok(records)
}

/// Normalizes a record value to an integer step count.
///
/// Accepts a JSON number or a numeric string; fractional parts are
/// truncated toward zero, matching integer-parse semantics.
fn normalize_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().map(|f| f.trunc() as i64),
        },
        serde_json::Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Some(i),
                Err(_) => s.parse::<f64>().ok().map(|f| f.trunc() as i64),
            }
        }
        _ => None,
    }
}
