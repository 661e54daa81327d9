//! Catalog of step files in the export and the window-overlap selection.

use crate::error::StepsError;
use crate::pipeline::types::{SourceEntry, Window, parse_timestamp};
use tracing::debug;

/// Builds the sorted catalog from the export's member-name list.
///
/// Only members shaped like `steps-<date>.json` participate; everything
/// else in the export (other metrics, metadata files) is ignored.
pub fn build_catalog(member_names: &[String]) -> Vec<SourceEntry> {
    let mut entries: Vec<SourceEntry> = member_names
        .iter()
        .filter_map(|name| {
            let stem = member_stem(name)?;
            match parse_timestamp(stem) {
                Some(date) => Some(SourceEntry {
                    name: name.clone(),
                    date,
                }),
                None => {
                    debug!(name, "Skipping step file with unparseable date");
                    None
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    entries
}

fn member_stem(name: &str) -> Option<&str> {
    let rest = &name[name.rfind("steps-")? + "steps-".len()..];
    rest.strip_suffix(".json")
}

/// Selects the contiguous slice of entries overlapping the window.
///
/// Entries are dated at one representative instant, so the file just
/// before the window may hold trailing in-window records; the selection
/// over-reaches by one on each side and relies on the window filter for
/// exactness.
pub fn select<'a>(
    entries: &'a [SourceEntry],
    window: &Window,
) -> Result<&'a [SourceEntry], StepsError> {
    if entries.is_empty() {
        return Err(StepsError::EmptySourceSet);
    }

    let first_ge = entries.iter().position(|e| e.date >= window.start);
    let start_index = match first_ge {
        Some(0) => 0,
        None => entries.len() - 1,
        Some(i) => i - 1,
    };

    let first_gt = entries.iter().position(|e| e.date > window.end);
    let end_index = first_gt.unwrap_or(entries.len());

    Ok(&entries[start_index.min(end_index)..end_index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    fn entries() -> Vec<SourceEntry> {
        build_catalog(&[
            "steps-2024-01-03.json".to_string(),
            "steps-2024-01-01.json".to_string(),
            "steps-2024-01-02.json".to_string(),
            "Takeout/Fitbit/heart_rate-2024-01-01.json".to_string(),
            "readme.txt".to_string(),
        ])
    }

    #[test]
    fn test_build_catalog_filters_and_sorts() {
        let catalog = entries();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].name, "steps-2024-01-01.json");
        assert_eq!(catalog[2].name, "steps-2024-01-03.json");
    }

    #[test]
    fn test_build_catalog_handles_nested_names() {
        let catalog = build_catalog(&[
            "Takeout/Fitbit/Global Export Data/steps-2024-05-06.json".to_string(),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].date, ts("2024-05-06"));
    }

    #[test]
    fn test_select_mid_window_includes_preceding_file() {
        let catalog = entries();
        let window = Window::new(ts("2024-01-02T10:00"), ts("2024-01-02T12:00"));
        let selected = select(&catalog, &window).unwrap();
        // the Jan 2 file is dated at midnight, before the window start, but
        // carries the in-window records
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "steps-2024-01-02.json");
    }

    #[test]
    fn test_select_window_spanning_files() {
        let catalog = entries();
        let window = Window::new(ts("2024-01-01T23:50"), ts("2024-01-02T00:10"));
        let selected = select(&catalog, &window).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "steps-2024-01-01.json");
        assert_eq!(selected[1].name, "steps-2024-01-02.json");
    }

    #[test]
    fn test_select_window_at_first_entry() {
        let catalog = entries();
        let window = Window::new(ts("2024-01-01"), ts("2024-01-03"));
        let selected = select(&catalog, &window).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_select_window_after_all_entries_keeps_last_file() {
        let catalog = entries();
        let window = Window::new(ts("2024-02-01"), ts("2024-02-02"));
        let selected = select(&catalog, &window).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "steps-2024-01-03.json");
    }

    #[test]
    fn test_select_window_before_all_entries_is_empty() {
        let catalog = entries();
        let window = Window::new(ts("2023-12-01"), ts("2023-12-02"));
        let selected = select(&catalog, &window).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_empty_catalog_is_an_error() {
        let window = Window::new(ts("2024-01-01"), ts("2024-01-02"));
        let err = select(&[], &window).unwrap_err();
        assert!(matches!(err, StepsError::EmptySourceSet));
    }
}
