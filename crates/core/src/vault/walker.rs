//! Recursive discovery of journal documents under the scan folders.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum WalkerError {
    #[error("journal root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk folder {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// A discovered markdown document.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to the journal root.
    pub relative_path: PathBuf,
}

/// Walker for discovering journal documents.
#[derive(Debug)]
pub struct JournalWalker {
    root: PathBuf,
    /// Folders to scan; empty means the whole root.
    scan_folders: Vec<PathBuf>,
}

impl JournalWalker {
    pub fn new(root: &Path, scan_folders: Vec<PathBuf>) -> Result<Self, WalkerError> {
        if !root.is_dir() {
            return Err(WalkerError::MissingRoot(root.display().to_string()));
        }
        Ok(Self { root: root.to_path_buf(), scan_folders })
    }

    /// Walk the configured folders and return all markdown files, sorted by
    /// relative path. A configured folder that does not exist is skipped
    /// with a warning; it is not an error.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, WalkerError> {
        let mut files = Vec::new();

        let roots: Vec<PathBuf> = if self.scan_folders.is_empty() {
            vec![self.root.clone()]
        } else {
            self.scan_folders.clone()
        };

        for folder in &roots {
            if !folder.is_dir() {
                warn!(folder = %folder.display(), "scan folder does not exist, skipping");
                continue;
            }

            for entry in WalkDir::new(folder)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !is_excluded(e))
            {
                let entry = entry.map_err(|e| {
                    WalkerError::WalkError(folder.display().to_string(), e)
                })?;

                let path = entry.path();
                if !path.is_file() || !is_markdown_file(path) {
                    continue;
                }

                let relative_path =
                    path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

                files.push(WalkedFile {
                    absolute_path: path.to_path_buf(),
                    relative_path,
                });
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    // Skip hidden files and directories
    if name.starts_with('.') {
        return true;
    }

    // Skip common non-journal directories
    matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv")
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}
