use nocturne_core::config::loader::{default_config_path, ConfigLoader};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   noct doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("journal_root: {}", rc.journal_root.display());
            println!("templates_dir: {}", rc.templates_dir.display());
            println!("toc_file: {}", rc.toc_file.display());
            if rc.scan_folders.is_empty() {
                println!("scan_folders: (journal root)");
            } else {
                for folder in &rc.scan_folders {
                    println!("scan_folder: {}", folder.display());
                }
            }
            println!("callouts.journal: {}", rc.callouts.journal);
            println!("callouts.dream:   {}", rc.callouts.dream);
            println!("callouts.toc:     {}", rc.callouts.toc);
            println!("dashboard.preview_word_limit: {}", rc.dashboard.preview_word_limit);
        }
        Err(e) => {
            println!("FAIL noct doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
