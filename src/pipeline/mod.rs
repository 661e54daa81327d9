//! The data selection and aggregation pipeline.
//!
//! One run flows catalog -> selection -> load -> window filter -> 5-minute
//! bucket aggregation, producing a [`BucketGrid`] for the exporter.

pub mod bucket;
pub mod catalog;
pub mod filter;
pub mod loader;
pub mod types;

use crate::archive::ArchiveReader;
use crate::error::StepsError;
use tracing::info;

pub use types::{BucketGrid, SourceEntry, StepRecord, Window};

/// Runs the whole pipeline over an export for one window.
///
/// The window is captured for the duration of the run; any read or parse
/// failure aborts with no partial result.
#[tracing::instrument(skip(reader), fields(start = %window.start, end = %window.end))]
pub async fn run(
    reader: &dyn ArchiveReader,
    window: Window,
) -> Result<BucketGrid, StepsError> {
    let entries = catalog::build_catalog(&reader.member_names());
    let selected = catalog::select(&entries, &window)?;

    if let (Some(first), Some(last)) = (selected.first(), selected.last()) {
        info!(
            first = %first.name,
            last = %last.name,
            count = selected.len(),
            "Processing step files"
        );
    } else {
        info!("No step files overlap the requested window");
    }

    let records = loader::load_records(reader, selected).await?;
    let filtered = filter::filter_window(records, &window);

    info!(records = filtered.len(), "Records retained by window filter");

    bucket::aggregate(&filtered, &window)
}
