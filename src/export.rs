//! Rendering and CSV export of the aggregated bucket grid.

use anyhow::Result;
use chrono::NaiveDateTime;
use csv::WriterBuilder;
use std::path::Path;
use tracing::debug;

use crate::pipeline::{BucketGrid, Window};

/// Formats a bucket key as `dd-mm-yyyy HH:MM`, zero-padded and 24-hour,
/// independent of the host locale.
pub fn format_label(key: &NaiveDateTime) -> String {
    key.format("%d-%m-%Y %H:%M").to_string()
}

/// Renders the grid as ordered (label, total) display rows.
pub fn render(grid: &BucketGrid) -> Vec<(String, i64)> {
    grid.iter()
        .map(|(key, total)| (format_label(key), *total))
        .collect()
}

/// Serializes the grid as a `DateTime,Steps` CSV blob, one row per bucket
/// in chronological order.
pub fn to_csv(grid: &BucketGrid) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(["DateTime", "Steps"])?;
    for (key, total) in grid.iter() {
        writer.write_record([format_label(key), total.to_string()])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Conventional export file name: `fitbit-<start>--<end>.csv` with
/// `dd-mm-yyyy` dates.
pub fn export_file_name(window: &Window) -> String {
    format!(
        "fitbit-{}--{}.csv",
        window.start.format("%d-%m-%Y"),
        window.end.format("%d-%m-%Y")
    )
}

/// Writes the CSV blob to disk.
pub fn write_csv(path: impl AsRef<Path>, grid: &BucketGrid) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = grid.len(), "Writing CSV export");
    std::fs::write(path, to_csv(grid)?)?;
    Ok(())
}
