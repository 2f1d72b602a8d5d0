//! Table-of-contents maintenance inside a designated callout.
//!
//! The TOC note holds a callout whose nested list carries one link per
//! journal entry. New links are appended after the last existing list item,
//! located by the callout scanner.

use thiserror::Error;

use crate::callout::scanner::{ScanStrategy, find_list_insertion_point};

#[derive(Debug, Error)]
pub enum TocError {
    /// The note has no callout of the given name containing a list.
    #[error("insertion point not found: no [!{0}] callout with a list in the target note")]
    InsertionPointNotFound(String),
}

/// Render the nested list line for one entry link.
///
/// `target` is the note path or name the wikilink resolves against; a
/// non-empty `label` different from the target becomes the link alias.
pub fn format_link_item(target: &str, label: &str) -> String {
    if label.is_empty() || label == target {
        format!(">> - [[{target}]]")
    } else {
        format!(">> - [[{target}|{label}]]")
    }
}

/// Insert `item` as the last list item of the named callout's list and
/// return the updated document text. The input text is not modified.
pub fn insert_list_item(
    document: &str,
    callout_name: &str,
    item: &str,
    strategy: ScanStrategy,
) -> Result<String, TocError> {
    let at = find_list_insertion_point(document, Some(callout_name), strategy)
        .ok_or_else(|| TocError::InsertionPointNotFound(callout_name.to_string()))?;

    let mut lines: Vec<&str> = document.lines().collect();
    lines.insert(at, item);

    let mut updated = lines.join("\n");
    if document.ends_with('\n') {
        updated.push('\n');
    }
    Ok(updated)
}
