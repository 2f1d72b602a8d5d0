//! Journal entry extraction from raw document text.
//!
//! The inverse of template rendering: given a document holding a rendered
//! entry, recover the date, the journal-only content and the derived
//! counts. Extraction misses (no callout, no recognizable date) yield
//! `None`; they are valid outcomes, not errors.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::callout;

use super::types::DashboardEntry;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

static BLOCK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^(\d{8})").unwrap());

static BLOCK_ID_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // A line that is only a block-id marker, e.g. `> ^20250628`
    Regex::new(r"^>+\s*\^\S+\s*$").unwrap()
});

static PROSE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday),\s+(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2})\b",
    )
    .unwrap()
});

/// Extractor for one configured callout convention.
pub struct EntryExtractor {
    preview_word_limit: usize,
    header_re: Regex,
    dream_marker_re: Regex,
    /// Supplies the assumed year for natural-language dates.
    reference_date: NaiveDate,
}

impl EntryExtractor {
    pub fn new(
        journal_callout: &str,
        dream_callout: &str,
        preview_word_limit: usize,
    ) -> Self {
        Self::with_reference_date(
            journal_callout,
            dream_callout,
            preview_word_limit,
            Local::now().date_naive(),
        )
    }

    /// Like [`EntryExtractor::new`] but with an explicit reference date, so
    /// natural-language date parsing is deterministic under test.
    pub fn with_reference_date(
        journal_callout: &str,
        dream_callout: &str,
        preview_word_limit: usize,
        reference_date: NaiveDate,
    ) -> Self {
        let header_re = Regex::new(&format!(
            r"(?i)^>\s*\[!{}\]\s*(.*)$",
            regex::escape(journal_callout)
        ))
        .expect("valid regex");
        let dream_marker_re =
            Regex::new(&format!(r"(?i)\[!{}\]", regex::escape(dream_callout)))
                .expect("valid regex");

        Self { preview_word_limit, header_re, dream_marker_re, reference_date }
    }

    /// Extract the journal entry from `text`, or `None` when the document
    /// holds no parseable entry.
    pub fn extract(&self, text: &str, file_path: &Path) -> Option<DashboardEntry> {
        let lines: Vec<&str> = text.lines().collect();

        // Locate the callout block: header line through the last `>` line
        let start = lines.iter().position(|l| self.header_re.is_match(l))?;
        let end = lines[start..]
            .iter()
            .position(|l| !l.starts_with('>'))
            .map_or(lines.len(), |offset| start + offset);
        let block = &lines[start..end];

        let date = self.extract_date(block)?;
        let full_content = self.journal_content(block);

        let word_count = full_content.split_whitespace().count();
        let image_count = callout::count_image_embeds(&block.join("\n"));
        let preview = self.preview(&full_content);
        let title = self.title(block[0], file_path);

        Some(DashboardEntry {
            date,
            title,
            preview,
            full_content,
            word_count,
            image_count,
            file_path: file_path.to_path_buf(),
        })
    }

    /// Date resolution order: an ISO date on the header line, then a
    /// `^YYYYMMDD` block id on the second line, then a `<Weekday>, <Month>
    /// <day>` phrase with the reference year assumed.
    fn extract_date(&self, block: &[&str]) -> Option<NaiveDate> {
        if let Some(m) = ISO_DATE_RE.find(block[0])
            && let Ok(d) = NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d")
        {
            return Some(d);
        }

        if let Some(second) = block.get(1)
            && let Some(caps) = BLOCK_ID_RE.captures(second)
            && let Ok(d) = NaiveDate::parse_from_str(&caps[1], "%Y%m%d")
        {
            return Some(d);
        }

        if let Some(caps) = PROSE_DATE_RE.captures(block[0]) {
            let month = month_number(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            return NaiveDate::from_ymd_opt(self.reference_date.year(), month, day);
        }

        None
    }

    /// Journal-only content: the block minus the header, block-id markers,
    /// image embeds, nested callout headers, and everything at or after the
    /// dream-callout marker. Surviving lines are joined by single spaces.
    fn journal_content(&self, block: &[&str]) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for line in block.iter().skip(1) {
            if self.dream_marker_re.is_match(line) {
                break;
            }
            if BLOCK_ID_LINE_RE.is_match(line.trim_start()) {
                continue;
            }

            let stripped =
                line.trim_start().strip_prefix('>').unwrap_or(line).trim();
            if stripped.is_empty() {
                continue;
            }

            // Deeper-nested markers stay in place; only look past them to
            // recognize embeds and nested callout headers
            let unquoted = stripped.trim_start_matches('>').trim_start();
            if unquoted.starts_with("![[") || unquoted.starts_with("[!") {
                continue;
            }

            parts.push(stripped);
        }

        parts.join(" ")
    }

    fn preview(&self, content: &str) -> String {
        let words: Vec<&str> = content.split_whitespace().collect();
        if words.len() > self.preview_word_limit {
            format!("{}...", words[..self.preview_word_limit].join(" "))
        } else {
            content.to_string()
        }
    }

    /// Title from the header line's text after the bracket, falling back to
    /// the file stem.
    fn title(&self, header: &str, file_path: &Path) -> String {
        let remainder = self
            .header_re
            .captures(header)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        if remainder.is_empty() {
            file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        } else {
            remainder
        }
    }
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.to_ascii_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}
