use crate::TocArgs;
use nocturne_core::callout::scanner::ScanStrategy;
use nocturne_core::config::loader::{default_config_path, ConfigLoader};
use nocturne_core::toc::{format_link_item, insert_list_item};
use std::fs;
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: TocArgs) {
    let cfg = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL noct toc");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let toc_text = match fs::read_to_string(&cfg.toc_file) {
        Ok(t) => t,
        Err(e) => {
            println!("FAIL noct toc");
            println!("failed to read {}: {e}", cfg.toc_file.display());
            std::process::exit(1);
        }
    };

    let target = args.entry.with_extension("");
    let label = args.label.clone().unwrap_or_default();
    let item = format_link_item(&target.to_string_lossy(), &label);

    let strategy = if args.last { ScanStrategy::Last } else { ScanStrategy::First };

    let updated = match insert_list_item(&toc_text, &cfg.callouts.toc, &item, strategy) {
        Ok(u) => u,
        Err(e) => {
            println!("FAIL noct toc");
            println!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = fs::write(&cfg.toc_file, updated) {
        println!("FAIL noct toc");
        println!("failed to write {}: {e}", cfg.toc_file.display());
        std::process::exit(1);
    }

    println!("OK   noct toc");
    println!("note: {}", cfg.toc_file.display());
    println!("link: {item}");
}
