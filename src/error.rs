//! Failure taxonomy for the processing pipeline.
//!
//! Every error is fatal for the run: there is no retry and no partial
//! output, since the result is a user-facing report.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StepsError {
    /// A required input (export directory, start date, end date) was not
    /// supplied or could not be understood.
    #[error("missing or unusable input: {0}")]
    MissingInput(&'static str),

    /// The export contains no `steps-*.json` members at all.
    #[error("no step files found in the export")]
    EmptySourceSet,

    /// The archive reader could not retrieve a selected member's content.
    #[error("failed to read entry {name}")]
    EntryReadFailure {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A selected member's content is not a valid record list, or a record
    /// carries an unparseable timestamp or a non-numeric value.
    #[error("failed to parse entry {name}: {reason}")]
    EntryParseFailure { name: String, reason: String },

    /// A filtered record mapped to a bucket key absent from the pre-built
    /// grid. The grid covers every day the window touches, so this is
    /// unreachable unless the grid construction is broken.
    #[error("record at {timestamp} maps to bucket {bucket} missing from the grid")]
    InternalConsistency {
        timestamp: NaiveDateTime,
        bucket: NaiveDateTime,
    },
}
