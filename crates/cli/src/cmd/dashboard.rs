//! Dashboard table over the parsed journal entries.

use crate::DashboardArgs;
use chrono::Local;
use nocturne_core::config::loader::{default_config_path, ConfigLoader};
use nocturne_core::dashboard::batch::{extract_entries, sort_entries};
use nocturne_core::dashboard::extractor::EntryExtractor;
use nocturne_core::dashboard::stats::filter_entries;
use nocturne_core::dashboard::types::{
    DashboardEntry, DateFilter, SortColumn, SortDirection,
};
use nocturne_core::vault::walker::JournalWalker;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Preview")]
    preview: String,
    #[tabled(rename = "Words")]
    words: usize,
    #[tabled(rename = "Images")]
    images: usize,
}

impl From<&DashboardEntry> for EntryRow {
    fn from(entry: &DashboardEntry) -> Self {
        Self {
            date: entry.date.to_string(),
            title: entry.title.clone(),
            preview: entry.preview.clone(),
            words: entry.word_count,
            images: entry.image_count,
        }
    }
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: DashboardArgs) {
    let cfg = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL noct dashboard");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let column: SortColumn = match args.sort.parse() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let filter: DateFilter = match args.filter.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let direction =
        if args.desc { SortDirection::Descending } else { SortDirection::Ascending };

    let walker = match JournalWalker::new(&cfg.journal_root, cfg.scan_folders.clone()) {
        Ok(w) => w,
        Err(e) => {
            println!("FAIL noct dashboard");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let files = match walker.walk() {
        Ok(f) => f,
        Err(e) => {
            println!("FAIL noct dashboard");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let extractor = EntryExtractor::new(
        &cfg.callouts.journal,
        &cfg.callouts.dream,
        cfg.dashboard.preview_word_limit,
    );

    let today = Local::now().date_naive();
    let mut entries =
        filter_entries(extract_entries(&files, &extractor), filter, today);
    sort_entries(&mut entries, column, direction);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        return;
    }

    if entries.is_empty() {
        println!("(no journal entries found)");
        return;
    }

    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
    println!("{}", Table::new(rows).with(Style::modern()));
    println!("-- {} entries --", entries.len());
}
