//! Line-oriented scanner locating the end of a callout's embedded list.
//!
//! Table-of-contents links are appended as new list items at the end of an
//! existing nested list inside a specific callout. The scanner is a small
//! finite-state machine over the document's lines; it does not need (or
//! want) a full markdown block parser.

use std::sync::LazyLock;

use regex::Regex;

use super::header_matcher;

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    // `>>` markers, then a list marker with optional intermediate whitespace
    Regex::new(r"^>>\s*[-*+]").unwrap()
});

/// Which qualifying callout region wins when a document contains several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Return as soon as the first qualifying region closes.
    #[default]
    First,
    /// Keep scanning and return the last qualifying region.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InCallout { depth: u8 },
}

/// Find the line index directly after the last list item of the named
/// callout's embedded list.
///
/// With `callout_name` as `None` or empty, the first callout of any name
/// opens a region. Returns `None` when no callout containing a nested list
/// exists in the document.
///
/// The returned index is 0-based and may equal the line count when the list
/// ends on the document's final line.
pub fn find_list_insertion_point(
    text: &str,
    callout_name: Option<&str>,
    strategy: ScanStrategy,
) -> Option<usize> {
    let header_re = header_matcher(callout_name.unwrap_or(""));
    let mut state = ScanState::Outside;
    let mut last_list_line: Option<usize> = None;
    let mut candidate: Option<usize> = None;

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim_start();

        match state {
            ScanState::Outside => {
                if header_re.is_match(trimmed) {
                    state = ScanState::InCallout { depth: 1 };
                    last_list_line = None;
                }
            }
            ScanState::InCallout { depth } => {
                if !trimmed.starts_with('>') {
                    // Region closed
                    if let Some(last) = last_list_line {
                        match strategy {
                            ScanStrategy::First => return Some(last + 1),
                            ScanStrategy::Last => candidate = Some(last + 1),
                        }
                    }
                    state = ScanState::Outside;
                    last_list_line = None;
                    // The closing line itself can never reopen a region: a
                    // header line always starts with `>`.
                } else if trimmed.starts_with(">>>") {
                    if depth == 2 {
                        state = ScanState::InCallout { depth: 3 };
                    }
                } else if trimmed.starts_with(">>") {
                    if depth == 1 {
                        state = ScanState::InCallout { depth: 2 };
                    }
                    if LIST_ITEM_RE.is_match(trimmed) {
                        last_list_line = Some(index);
                    }
                } else {
                    state = ScanState::InCallout { depth: 1 };
                }
            }
        }
    }

    // Document ended inside an open region
    if matches!(state, ScanState::InCallout { .. })
        && let Some(last) = last_list_line
    {
        match strategy {
            ScanStrategy::First => return Some(last + 1),
            ScanStrategy::Last => candidate = Some(last + 1),
        }
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_point_after_last_list_item() {
        let doc = "> [!toc]\n>> - Item1\n>> - Item2\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(3));
    }

    #[test]
    fn test_open_region_at_eof() {
        let doc = "> [!toc]\n>> - Item1\n>> - Item2";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(3));
    }

    #[test]
    fn test_callout_without_list_is_skipped() {
        let doc = "> [!toc]\n> just prose\n\n> [!toc]\n>> - Item\n";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(5));
    }

    #[test]
    fn test_no_qualifying_callout() {
        let doc = "> [!toc]\n> prose only\n\nplain text";
        assert_eq!(find_list_insertion_point(doc, Some("toc"), ScanStrategy::First), None);
        assert_eq!(find_list_insertion_point(doc, Some("other"), ScanStrategy::First), None);
    }

    #[test]
    fn test_named_mode_ignores_other_callouts() {
        let doc = "> [!links]\n>> - Other\n\n> [!toc]\n>> - Mine\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(5));
    }

    #[test]
    fn test_first_callout_mode_matches_any_name() {
        let doc = "> [!links]\n>> - Other\n\n> [!toc]\n>> - Mine\n";
        let at = find_list_insertion_point(doc, None, ScanStrategy::First);
        assert_eq!(at, Some(2));
    }

    #[test]
    fn test_first_vs_last_strategy() {
        let doc = "> [!toc]\n>> - A\n\n> [!toc]\n>> - B\n>> - C\n\nend";
        let first = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        let last = find_list_insertion_point(doc, Some("toc"), ScanStrategy::Last);
        assert_eq!(first, Some(2));
        assert_eq!(last, Some(6));
    }

    #[test]
    fn test_depth_reset_keeps_region_open() {
        let doc = "> [!toc]\n>> - Item1\n> interlude\n>> - Item2\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(4));
    }

    #[test]
    fn test_triple_nesting_is_not_a_list_item() {
        let doc = "> [!toc]\n>> - Item1\n>>> - nested deeper\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(2));
    }

    #[test]
    fn test_list_markers_star_and_plus() {
        let doc = "> [!toc]\n>> * Star\n>> + Plus\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(3));
    }

    #[test]
    fn test_whitespace_between_markers_and_item() {
        let doc = "> [!toc]\n>>   - Spaced\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(2));
    }

    #[test]
    fn test_case_insensitive_name() {
        let doc = "> [!TOC]\n>> - Item\n> end";
        let at = find_list_insertion_point(doc, Some("toc"), ScanStrategy::First);
        assert_eq!(at, Some(2));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(find_list_insertion_point("", Some("toc"), ScanStrategy::First), None);
        assert_eq!(find_list_insertion_point("", None, ScanStrategy::Last), None);
    }
}
