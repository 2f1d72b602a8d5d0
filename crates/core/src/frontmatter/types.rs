//! Frontmatter data types.

use serde::Deserialize;

/// YAML frontmatter of a template file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFrontmatter {
    /// Display name override (defaults to the logical name).
    #[serde(default)]
    pub name: Option<String>,
    /// Short description shown by `noct list-templates`.
    #[serde(default)]
    pub description: Option<String>,
}

/// A template file split into frontmatter and body.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    pub frontmatter: Option<TemplateFrontmatter>,
    /// Body content (excludes frontmatter).
    pub body: String,
}
