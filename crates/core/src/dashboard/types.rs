//! Dashboard data model.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Read-only projection of one journal document.
///
/// Created fresh on every parse pass and never mutated; the word and image
/// counts are derived during extraction, not stored anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardEntry {
    pub date: NaiveDate,
    pub title: String,
    /// First words of the journal content, ellipsized when truncated.
    pub preview: String,
    /// Journal-only content (dream-diary section excluded), lines joined
    /// with single spaces.
    pub full_content: String,
    pub word_count: usize,
    /// Image embeds in the whole callout block, dream section included.
    pub image_count: usize,
    pub file_path: PathBuf,
}

/// Date window the dashboard and statistics operate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFilter {
    Today,
    ThisWeek,
    ThisMonth,
    Last30Days,
    ThisYear,
    #[default]
    AllTime,
}

impl DateFilter {
    /// Whether `date` falls inside the window ending at `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateFilter::Today => date == today,
            DateFilter::ThisWeek => date <= today && today - date < Duration::days(7),
            DateFilter::ThisMonth => {
                date.year() == today.year() && date.month() == today.month() && date <= today
            }
            DateFilter::Last30Days => {
                date <= today && today - date < Duration::days(30)
            }
            DateFilter::ThisYear => date.year() == today.year() && date <= today,
            DateFilter::AllTime => true,
        }
    }

    /// Total days in the window, used as the journaling-frequency
    /// denominator. For `AllTime` the window starts at the first entry.
    pub fn total_days(self, today: NaiveDate, first_entry: Option<NaiveDate>) -> i64 {
        match self {
            DateFilter::Today => 1,
            DateFilter::ThisWeek => 7,
            DateFilter::ThisMonth => i64::from(today.day()),
            DateFilter::Last30Days => 30,
            DateFilter::ThisYear => i64::from(today.ordinal()),
            DateFilter::AllTime => match first_entry {
                Some(first) if first <= today => (today - first).num_days() + 1,
                _ => 1,
            },
        }
    }
}

impl FromStr for DateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateFilter::Today),
            "this-week" => Ok(DateFilter::ThisWeek),
            "this-month" => Ok(DateFilter::ThisMonth),
            "last-30-days" => Ok(DateFilter::Last30Days),
            "this-year" => Ok(DateFilter::ThisYear),
            "all-time" => Ok(DateFilter::AllTime),
            other => Err(format!("unknown date filter: {other}")),
        }
    }
}

impl std::fmt::Display for DateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DateFilter::Today => "today",
            DateFilter::ThisWeek => "this-week",
            DateFilter::ThisMonth => "this-month",
            DateFilter::Last30Days => "last-30-days",
            DateFilter::ThisYear => "this-year",
            DateFilter::AllTime => "all-time",
        };
        write!(f, "{s}")
    }
}

/// Column the dashboard table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Date,
    Title,
    WordCount,
    ImageCount,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortColumn::Date),
            "title" => Ok(SortColumn::Title),
            "words" => Ok(SortColumn::WordCount),
            "images" => Ok(SortColumn::ImageCount),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}
