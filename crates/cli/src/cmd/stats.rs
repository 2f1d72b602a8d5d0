//! Journaling statistics over the parsed entries.

use crate::StatsArgs;
use chrono::Local;
use nocturne_core::config::loader::{default_config_path, ConfigLoader};
use nocturne_core::dashboard::batch::extract_entries;
use nocturne_core::dashboard::extractor::EntryExtractor;
use nocturne_core::dashboard::stats::{calculate, filter_entries, DashboardStatistics};
use nocturne_core::dashboard::types::DateFilter;
use nocturne_core::template::repository::TemplateRepository;
use nocturne_core::template::types::JournalTemplate;
use nocturne_core::vault::walker::JournalWalker;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Stats payload for `--json` output.
#[derive(Serialize)]
struct StatsReport<'a> {
    filter: String,
    #[serde(flatten)]
    stats: &'a DashboardStatistics,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: StatsArgs) {
    let cfg = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL noct stats");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let filter: DateFilter = match args.filter.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let walker = match JournalWalker::new(&cfg.journal_root, cfg.scan_folders.clone()) {
        Ok(w) => w,
        Err(e) => {
            println!("FAIL noct stats");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let files = match walker.walk() {
        Ok(f) => f,
        Err(e) => {
            println!("FAIL noct stats");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let extractor = EntryExtractor::new(
        &cfg.callouts.journal,
        &cfg.callouts.dream,
        cfg.dashboard.preview_word_limit,
    );

    // Templates feed the dream-detection heuristics; a missing templates
    // directory just means the fallback heuristic runs.
    let templates: Vec<JournalTemplate> = match TemplateRepository::new(&cfg.templates_dir)
    {
        Ok(repo) => repo.eligible_for_dashboard(),
        Err(e) => {
            debug!("no templates for dream detection: {e}");
            Vec::new()
        }
    };

    let today = Local::now().date_naive();
    let entries = filter_entries(extract_entries(&files, &extractor), filter, today);
    let stats = calculate(&entries, filter, &templates, today);

    if args.json {
        let report = StatsReport { filter: filter.to_string(), stats: &stats };
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        return;
    }

    print_stats(filter, &stats);
}

fn print_stats(filter: DateFilter, stats: &DashboardStatistics) {
    println!("OK   noct stats");
    println!("filter: {filter}");
    println!("entries: {}", stats.total_entries);
    println!("total words: {}", stats.total_words);
    println!("avg words/entry: {}", stats.average_words);
    println!("median words: {}", stats.median_word_count);
    println!("current streak: {} days", stats.current_streak);
    if stats.longest_streak_range.is_empty() {
        println!("longest streak: {} days", stats.longest_streak);
    } else {
        println!(
            "longest streak: {} days ({})",
            stats.longest_streak, stats.longest_streak_range
        );
    }
    println!("days journaled: {}", stats.days_journaled);
    println!("frequency: {}%", stats.frequency_percent);
    println!("entries with images: {}%", stats.entries_with_images_percent);
    println!("entries with dreams: {}%", stats.entries_with_dreams_percent);
    println!("most active weekday: {}", stats.most_active_weekday);
}
