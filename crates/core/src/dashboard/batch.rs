//! Batch extraction across the walked journal files.
//!
//! Files are processed sequentially; a failure on one file is logged and
//! skipped, never aborting the rest of the batch. Result order follows
//! input order until [`sort_entries`] applies the dashboard ordering.

use std::fs;

use tracing::{debug, warn};

use crate::vault::walker::WalkedFile;

use super::extractor::EntryExtractor;
use super::types::{DashboardEntry, SortColumn, SortDirection};

/// Extract entries from `files` in order.
pub fn extract_entries(
    files: &[WalkedFile],
    extractor: &EntryExtractor,
) -> Vec<DashboardEntry> {
    let mut entries = Vec::new();

    for file in files {
        let text = match fs::read_to_string(&file.absolute_path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %file.absolute_path.display(), "skipping unreadable file: {e}");
                continue;
            }
        };

        match extractor.extract(&text, &file.relative_path) {
            Some(entry) => entries.push(entry),
            None => {
                debug!(path = %file.relative_path.display(), "no journal entry found");
            }
        }
    }

    entries
}

/// Sort entries by the selected column. The sort is stable: ties keep their
/// prior relative order.
pub fn sort_entries(
    entries: &mut [DashboardEntry],
    column: SortColumn,
    direction: SortDirection,
) {
    entries.sort_by(|a, b| {
        let ord = match column {
            SortColumn::Date => a.date.cmp(&b.date),
            SortColumn::Title => a.title.cmp(&b.title),
            SortColumn::WordCount => a.word_count.cmp(&b.word_count),
            SortColumn::ImageCount => a.image_count.cmp(&b.image_count),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
