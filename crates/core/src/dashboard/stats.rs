//! Derived journaling statistics.
//!
//! A pure aggregate over an extracted entry set: recomputed whenever the
//! entries or the active filter change, never persisted.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::template::analyzer;
use crate::template::types::JournalTemplate;

use super::types::{DashboardEntry, DateFilter};

static DREAM_CALLOUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[!dream[^\]]*\]").unwrap());

static PLACEHOLDER_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]+\}\}").unwrap());

const WEEKDAY_NAMES: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStatistics {
    pub total_entries: usize,
    pub total_words: usize,
    /// Rounded words per entry.
    pub average_words: usize,
    /// Consecutive days journaled, ending today or yesterday.
    pub current_streak: usize,
    pub longest_streak: usize,
    /// `Jun 26, 2025 - Jun 27, 2025`, or a single date for a one-day streak.
    pub longest_streak_range: String,
    /// Count of unique entry dates.
    pub days_journaled: usize,
    /// Share of days in the filter window with at least one entry, one
    /// decimal place.
    pub frequency_percent: f64,
    pub median_word_count: f64,
    pub entries_with_images_percent: f64,
    pub entries_with_dreams_percent: f64,
    pub most_active_weekday: String,
}

/// Keep only entries inside the filter window ending at `today`.
pub fn filter_entries(
    entries: Vec<DashboardEntry>,
    filter: DateFilter,
    today: NaiveDate,
) -> Vec<DashboardEntry> {
    entries.into_iter().filter(|e| filter.contains(e.date, today)).collect()
}

/// See [`calculate`]; uses the current local date.
pub fn calculate_now(
    entries: &[DashboardEntry],
    filter: DateFilter,
    templates: &[JournalTemplate],
) -> DashboardStatistics {
    calculate(entries, filter, templates, Local::now().date_naive())
}

/// Aggregate `entries` into dashboard statistics. `templates` feeds the
/// dream-detection heuristics and may be empty. An empty entry set yields
/// the all-zero result.
pub fn calculate(
    entries: &[DashboardEntry],
    filter: DateFilter,
    templates: &[JournalTemplate],
    today: NaiveDate,
) -> DashboardStatistics {
    if entries.is_empty() {
        return DashboardStatistics::default();
    }

    let total_entries = entries.len();
    let total_words: usize = entries.iter().map(|e| e.word_count).sum();
    let average_words =
        (total_words as f64 / total_entries as f64).round() as usize;

    let dates: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();
    let sorted: Vec<NaiveDate> = dates.iter().copied().collect();

    let current_streak = current_streak(&dates, today);
    let (longest_streak, range_start, range_end) = longest_streak(&sorted);
    let longest_streak_range = if range_start == range_end {
        format_date(range_start)
    } else {
        format!("{} - {}", format_date(range_start), format_date(range_end))
    };

    let days_journaled = dates.len();
    let total_days = filter.total_days(today, sorted.first().copied()).max(1);
    let frequency_percent =
        (days_journaled as f64 / total_days as f64 * 1000.0).round() / 10.0;

    let median_word_count = {
        let mut counts: Vec<usize> = entries.iter().map(|e| e.word_count).collect();
        counts.sort_unstable();
        let n = counts.len();
        if n % 2 == 0 {
            (counts[n / 2 - 1] + counts[n / 2]) as f64 / 2.0
        } else {
            counts[n / 2] as f64
        }
    };

    let with_images = entries.iter().filter(|e| e.image_count >= 1).count();
    let entries_with_images_percent =
        (with_images as f64 / total_entries as f64 * 100.0).round();

    let with_dreams = entries
        .iter()
        .filter(|e| has_dream_content(&e.full_content, templates))
        .count();
    let entries_with_dreams_percent =
        (with_dreams as f64 / total_entries as f64 * 100.0).round();

    let most_active_weekday = most_active_weekday(entries);

    DashboardStatistics {
        total_entries,
        total_words,
        average_words,
        current_streak,
        longest_streak,
        longest_streak_range,
        days_journaled,
        frequency_percent,
        median_word_count,
        entries_with_images_percent,
        entries_with_dreams_percent,
        most_active_weekday,
    }
}

/// Walk backward day-by-day from today. Today itself may be absent without
/// breaking the streak, at most once; any other gap ends the walk.
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> usize {
    let mut day = today;
    if !dates.contains(&day) {
        day -= Duration::days(1);
    }

    let mut streak = 0;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Maximal run of calendar-consecutive days over the sorted unique dates.
/// Returns the run length and its inclusive date range.
fn longest_streak(sorted: &[NaiveDate]) -> (usize, NaiveDate, NaiveDate) {
    let mut best = (1, sorted[0], sorted[0]);
    let mut run_start = sorted[0];
    let mut run_len = 1;
    let mut prev = sorted[0];

    for &date in &sorted[1..] {
        if date - prev == Duration::days(1) {
            run_len += 1;
        } else {
            run_start = date;
            run_len = 1;
        }
        if run_len > best.0 {
            best = (run_len, run_start, date);
        }
        prev = date;
    }

    best
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Per-entry weekday tally, Sunday-first; ties resolve to the lowest index
/// because the maximum search keeps the first occurrence.
fn most_active_weekday(entries: &[DashboardEntry]) -> String {
    let mut tally = [0usize; 7];
    for entry in entries {
        tally[entry.date.weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut best = 0;
    for (index, &count) in tally.iter().enumerate().skip(1) {
        if count > tally[best] {
            best = index;
        }
    }
    WEEKDAY_NAMES[best].to_string()
}

/// Dream-content detection. With template structures available the checks
/// stack in decreasing precision: a dream callout marker in the entry, then
/// literal (non-placeholder) text inside a template's dream span, then
/// keyword co-occurrence. Without templates only the plain substring
/// heuristic runs.
fn has_dream_content(content: &str, templates: &[JournalTemplate]) -> bool {
    if templates.is_empty() {
        let lower = content.to_lowercase();
        return lower.contains("dream")
            && (content.contains("[!") || lower.contains("diary"));
    }

    if DREAM_CALLOUT_RE.is_match(content) {
        return true;
    }

    for template in templates {
        if let Some((start, end)) = analyzer::analyze(&template.content).dream_content {
            let span = &template.content[start..end];
            let literal = PLACEHOLDER_TOKEN_RE.replace_all(span, "");
            if !literal.trim().is_empty() {
                return true;
            }
        }
    }

    let lower = content.to_lowercase();
    lower.contains("dream") && (content.contains("[!") || lower.contains("diary"))
}
