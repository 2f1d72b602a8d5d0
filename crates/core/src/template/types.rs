//! Template data model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::metrics::MetricValue;

/// A journal template: markdown text carrying `{{placeholder}}` tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalTemplate {
    /// Stable identifier (the logical name on disk).
    pub id: String,
    pub name: String,
    /// Markdown body with placeholders; frontmatter already stripped.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Classification of a placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderKind {
    JournalContent,
    DreamContent,
    Date,
    Other,
}

/// One placeholder occurrence, with character offsets into the template
/// string it was computed from. Editing the template invalidates every
/// recorded position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderPosition {
    pub kind: PlaceholderKind,
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Analysis result for one template string.
///
/// The cached spans point at the first placeholder of each kind found in
/// `placeholders`; a cached field is only present when such a placeholder
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStructure {
    pub placeholders: Vec<PlaceholderPosition>,
    /// Span of the first `{{journal-content}}` occurrence.
    pub journal_content: Option<(usize, usize)>,
    /// Span of the first `{{dream-content}}` occurrence.
    pub dream_content: Option<(usize, usize)>,
    /// Start offset of the first date placeholder.
    pub date_position: Option<usize>,
}

/// An image reference entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub path: String,
    /// Pixel width for the embed; 0 means no width annotation.
    #[serde(default)]
    pub width: u32,
}

/// Transient user input collected for one entry insertion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormState {
    /// Entry date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub journal_text: String,
    #[serde(default)]
    pub dream_title: String,
    #[serde(default)]
    pub dream_content: String,
    #[serde(default)]
    pub journal_image: ImageRef,
    #[serde(default)]
    pub dream_image: ImageRef,
    /// Metric id -> entered value.
    #[serde(default)]
    pub metric_values: HashMap<String, MetricValue>,
}
