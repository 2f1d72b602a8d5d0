use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub callouts: CalloutConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub journal_root: String,
    pub templates_dir: String,
    /// Folders under journal_root scanned for entries (relative to journal_root).
    /// Empty means scan the whole journal root.
    #[serde(default)]
    pub scan_folders: Vec<String>,
    /// Note holding the table-of-contents callout, relative to journal_root.
    #[serde(default = "default_toc_file")]
    pub toc_file: String,
}

fn default_toc_file() -> String {
    "index.md".to_string()
}

/// Callout names the journal convention uses.
#[derive(Debug, Deserialize, Clone)]
pub struct CalloutConfig {
    /// Callout wrapping a journal entry.
    #[serde(default = "default_journal_callout")]
    pub journal: String,
    /// Nested callout wrapping the dream-diary section of an entry.
    #[serde(default = "default_dream_callout")]
    pub dream: String,
    /// Callout holding the table-of-contents list.
    #[serde(default = "default_toc_callout")]
    pub toc: String,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            journal: default_journal_callout(),
            dream: default_dream_callout(),
            toc: default_toc_callout(),
        }
    }
}

fn default_journal_callout() -> String {
    "journal-entry".to_string()
}

fn default_dream_callout() -> String {
    "dream-diary".to_string()
}

fn default_toc_callout() -> String {
    "toc".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Word limit for the preview column (default: 50)
    #[serde(default = "default_preview_word_limit")]
    pub preview_word_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { preview_word_limit: default_preview_word_limit() }
    }
}

fn default_preview_word_limit() -> usize {
    50
}

/// Which dream metrics are rendered, in display order.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    /// Ids from the metric catalog; unknown ids are skipped with a warning.
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub journal_root: PathBuf,
    pub templates_dir: PathBuf,
    /// Scan folders resolved to absolute paths.
    pub scan_folders: Vec<PathBuf>,
    pub toc_file: PathBuf,
    pub callouts: CalloutConfig,
    pub dashboard: DashboardConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}
