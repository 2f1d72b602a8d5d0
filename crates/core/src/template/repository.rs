use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::frontmatter::parse_template;
use crate::template::analyzer::has_required_placeholders;
use crate::template::discovery::{
    TemplateDiscoveryError, TemplateInfo, discover_templates,
};
use crate::template::types::JournalTemplate;

#[derive(Debug, Error)]
pub enum TemplateRepoError {
    #[error(transparent)]
    Discovery(#[from] TemplateDiscoveryError),

    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct TemplateRepository {
    pub root: PathBuf,
    pub templates: Vec<TemplateInfo>,
}

impl TemplateRepository {
    pub fn new(root: &Path) -> Result<Self, TemplateDiscoveryError> {
        let templates = discover_templates(root)?;
        Ok(Self { root: root.to_path_buf(), templates })
    }

    pub fn list_all(&self) -> &[TemplateInfo] {
        &self.templates
    }

    pub fn get_by_name(&self, name: &str) -> Result<JournalTemplate, TemplateRepoError> {
        let info = self
            .templates
            .iter()
            .find(|t| t.logical_name == name)
            .ok_or_else(|| TemplateRepoError::NotFound(name.to_string()))?;

        load_template(info)
    }

    /// Load every discovered template, skipping unreadable files with a
    /// warning. Used for the dashboard's dream-detection heuristics.
    pub fn load_all(&self) -> Vec<JournalTemplate> {
        let mut out = Vec::with_capacity(self.templates.len());
        for info in &self.templates {
            match load_template(info) {
                Ok(t) => out.push(t),
                Err(e) => warn!(template = %info.logical_name, "skipping template: {e}"),
            }
        }
        out
    }

    /// Templates usable for dashboard parsing: those carrying
    /// `{{journal-content}}` plus a date placeholder.
    pub fn eligible_for_dashboard(&self) -> Vec<JournalTemplate> {
        self.load_all()
            .into_iter()
            .filter(|t| has_required_placeholders(&t.content))
            .collect()
    }
}

fn load_template(info: &TemplateInfo) -> Result<JournalTemplate, TemplateRepoError> {
    let content = fs::read_to_string(&info.path)
        .map_err(|e| TemplateRepoError::Io { path: info.path.clone(), source: e })?;

    let parsed = parse_template(&content);
    let fm = parsed.frontmatter.unwrap_or_default();

    Ok(JournalTemplate {
        id: info.logical_name.clone(),
        name: fm.name.unwrap_or_else(|| info.logical_name.clone()),
        content: parsed.body,
        description: fm.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with(files: &[(&str, &str)]) -> (TempDir, TemplateRepository) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let repo = TemplateRepository::new(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_get_by_name_strips_frontmatter() {
        let (_dir, repo) = repo_with(&[(
            "daily.md",
            "---\ndescription: morning pages\n---\n> [!journal-entry] {{date}}",
        )]);

        let tpl = repo.get_by_name("daily").unwrap();
        assert_eq!(tpl.id, "daily");
        assert_eq!(tpl.name, "daily");
        assert_eq!(tpl.description.as_deref(), Some("morning pages"));
        assert_eq!(tpl.content, "> [!journal-entry] {{date}}");
    }

    #[test]
    fn test_get_by_name_not_found() {
        let (_dir, repo) = repo_with(&[("daily.md", "x")]);
        let err = repo.get_by_name("weekly").unwrap_err();
        assert!(matches!(err, TemplateRepoError::NotFound(name) if name == "weekly"));
    }

    #[test]
    fn test_name_override_from_frontmatter() {
        let (_dir, repo) =
            repo_with(&[("d.md", "---\nname: Dream Log\n---\nbody")]);
        let tpl = repo.get_by_name("d").unwrap();
        assert_eq!(tpl.name, "Dream Log");
    }

    #[test]
    fn test_eligible_for_dashboard_filters() {
        let (_dir, repo) = repo_with(&[
            ("good.md", "> [!journal-entry] {{date}}\n> {{journal-content}}"),
            ("no-date.md", "> {{journal-content}}"),
            ("no-content.md", "> {{date}}"),
        ]);

        let eligible = repo.eligible_for_dashboard();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "good");
    }
}
