//! Template discovery under the configured templates directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Relative path without the `.md` extension, `/`-separated.
    pub logical_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum TemplateDiscoveryError {
    #[error("templates directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to read templates directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// Discover template files recursively under `root`, sorted by logical name.
pub fn discover_templates(
    root: &Path,
) -> Result<Vec<TemplateInfo>, TemplateDiscoveryError> {
    if !root.is_dir() {
        return Err(TemplateDiscoveryError::MissingDir(root.display().to_string()));
    }

    let mut templates = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            TemplateDiscoveryError::WalkError(root.display().to_string(), e)
        })?;

        let path = entry.path();
        if !path.is_file() || !is_template_file(path) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if is_hidden(rel) {
            continue;
        }

        templates.push(TemplateInfo {
            logical_name: logical_name_from_relative(rel),
            path: path.to_path_buf(),
        });
    }

    templates.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
    Ok(templates)
}

fn is_template_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

fn is_hidden(rel: &Path) -> bool {
    rel.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

fn logical_name_from_relative(rel: &Path) -> String {
    let without_ext = rel.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
