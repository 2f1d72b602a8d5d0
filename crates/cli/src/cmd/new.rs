use crate::prompt::{prompt_for_field, prompt_multiline, PromptOptions};
use crate::NewArgs;
use chrono::Local;
use nocturne_core::config::loader::{default_config_path, ConfigLoader};
use nocturne_core::config::types::ResolvedConfig;
use nocturne_core::template::metrics::{
    select_metrics, MetricDefinition, MetricKind, MetricValue,
};
use nocturne_core::template::renderer::render;
use nocturne_core::template::repository::{TemplateRepoError, TemplateRepository};
use nocturne_core::template::types::FormState;
use nocturne_core::toc::{format_link_item, insert_list_item};
use nocturne_core::callout::scanner::ScanStrategy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: NewArgs) {
    debug!("running noct new");
    let cfg = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL noct new");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let repo = match TemplateRepository::new(&cfg.templates_dir) {
        Ok(r) => r,
        Err(e) => {
            println!("FAIL noct new");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let template = match repo.get_by_name(&args.template) {
        Ok(t) => t,
        Err(TemplateRepoError::NotFound(name)) => {
            eprintln!("Template not found: {name}");
            eprintln!("Available templates:");
            for info in repo.list_all() {
                eprintln!("  {}", info.logical_name);
            }
            std::process::exit(1);
        }
        Err(other) => {
            eprintln!("Failed to load template: {other}");
            std::process::exit(1);
        }
    };

    let options = PromptOptions { batch_mode: args.batch };
    let selected = select_metrics(&cfg.metrics.selected);

    let form = match collect_form(&args, &selected, &options) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rendered = render(&template, &form, &selected);

    let output_path = resolve_output_path(&cfg, &args, &form.date);
    if output_path.exists() {
        eprintln!(
            "Refusing to overwrite existing file: {}",
            output_path.display()
        );
        std::process::exit(1);
    }

    if let Some(parent) = output_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create parent directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    if let Err(e) = fs::write(&output_path, &rendered) {
        eprintln!("Failed to write entry file {}: {e}", output_path.display());
        std::process::exit(1);
    }

    if args.toc {
        if let Err(e) = append_toc_link(&cfg, &output_path, &form.date) {
            eprintln!("Warning: could not update TOC: {e}");
        }
    }

    println!("OK   noct new");
    println!("template: {}", args.template);
    println!("output:   {}", output_path.display());
}

fn collect_form(
    args: &NewArgs,
    selected: &[MetricDefinition],
    options: &PromptOptions,
) -> Result<FormState, String> {
    let interactive = options.interactive();

    let date = match &args.date {
        Some(d) => d.clone(),
        None => {
            let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
            if interactive {
                prompt_for_field("Entry date", Some(&today), true)
                    .map_err(|e| e.to_string())?
            } else {
                today
            }
        }
    };

    let journal_text = match &args.journal {
        Some(t) => t.clone(),
        None if interactive => prompt_multiline("").map_err(|e| e.to_string())?,
        None => String::new(),
    };

    let dream_title = match &args.dream_title {
        Some(t) => t.clone(),
        None if interactive => {
            prompt_for_field("Dream title (empty for none)", None, false)
                .map_err(|e| e.to_string())?
        }
        None => String::new(),
    };

    let dream_content = match &args.dream {
        Some(t) => t.clone(),
        None if interactive && !dream_title.is_empty() => {
            prompt_multiline("").map_err(|e| e.to_string())?
        }
        None => String::new(),
    };

    let metric_values = collect_metric_values(args, selected, interactive)?;

    Ok(FormState {
        date,
        journal_text,
        dream_title,
        dream_content,
        metric_values,
        ..FormState::default()
    })
}

fn collect_metric_values(
    args: &NewArgs,
    selected: &[MetricDefinition],
    interactive: bool,
) -> Result<HashMap<String, MetricValue>, String> {
    let mut values = HashMap::new();

    let provided: HashMap<&str, &str> = args
        .metrics
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    for def in selected {
        let raw = match provided.get(def.id.as_str()) {
            Some(v) => Some((*v).to_string()),
            None if interactive => {
                let text =
                    prompt_for_field(&format!("{} ({})", def.name, def.description), None, false)
                        .map_err(|e| e.to_string())?;
                if text.is_empty() { None } else { Some(text) }
            }
            None => None,
        };

        if let Some(raw) = raw {
            values.insert(def.id.clone(), parse_metric_value(def, &raw)?);
        }
    }

    Ok(values)
}

fn parse_metric_value(def: &MetricDefinition, raw: &str) -> Result<MetricValue, String> {
    match def.kind {
        MetricKind::Score | MetricKind::Number => raw
            .parse::<f64>()
            .map(MetricValue::Number)
            .map_err(|_| format!("metric '{}' expects a number, got '{raw}'", def.id)),
        MetricKind::Text | MetricKind::List => Ok(MetricValue::Text(raw.to_string())),
    }
}

/// Default output: `<first scan folder>/<date>.md`, or the journal root
/// when no scan folders are configured. A relative `--output` is taken
/// against the journal root.
fn resolve_output_path(cfg: &ResolvedConfig, args: &NewArgs, date: &str) -> PathBuf {
    match &args.output {
        Some(out) if out.is_absolute() => out.clone(),
        Some(out) => cfg.journal_root.join(out),
        None => {
            let dir = cfg
                .scan_folders
                .first()
                .cloned()
                .unwrap_or_else(|| cfg.journal_root.clone());
            dir.join(format!("{date}.md"))
        }
    }
}

fn append_toc_link(
    cfg: &ResolvedConfig,
    entry_path: &Path,
    date: &str,
) -> Result<(), String> {
    let toc_text = fs::read_to_string(&cfg.toc_file)
        .map_err(|e| format!("failed to read {}: {e}", cfg.toc_file.display()))?;

    let target = entry_path
        .strip_prefix(&cfg.journal_root)
        .unwrap_or(entry_path)
        .with_extension("");
    let item = format_link_item(&target.to_string_lossy(), date);

    let updated = insert_list_item(&toc_text, &cfg.callouts.toc, &item, ScanStrategy::First)
        .map_err(|e| e.to_string())?;

    fs::write(&cfg.toc_file, updated)
        .map_err(|e| format!("failed to write {}: {e}", cfg.toc_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nocturne_core::template::metrics::builtin_metrics;

    fn metric(id: &str) -> MetricDefinition {
        builtin_metrics().into_iter().find(|m| m.id == id).unwrap()
    }

    #[test]
    fn test_parse_metric_value_number() {
        let def = metric("confidence");
        assert_eq!(
            parse_metric_value(&def, "4").unwrap(),
            MetricValue::Number(4.0)
        );
        assert!(parse_metric_value(&def, "high").is_err());
    }

    #[test]
    fn test_parse_metric_value_text() {
        let def = metric("setting");
        assert_eq!(
            parse_metric_value(&def, "a large house").unwrap(),
            MetricValue::Text("a large house".to_string())
        );
    }
}
