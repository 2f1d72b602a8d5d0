use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Lay out a journal, templates dir and config file inside `tmp`, returning
/// the config path and the journal root.
pub fn setup_journal(tmp: &Path) -> (PathBuf, PathBuf) {
    let journal = tmp.join("journal");
    fs::create_dir_all(journal.join("dreams")).unwrap();

    let tpl_root = journal.join(".nocturne").join("templates");
    fs::create_dir_all(&tpl_root).unwrap();
    fs::write(
        tpl_root.join("daily.md"),
        "> [!journal-entry] {{date}}\n> ^{{date-compact}}\n> {{journal-content}}\n",
    )
    .unwrap();

    let cfg_dir = tmp.join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    let cfg_path = cfg_dir.join("config.toml");

    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
journal_root = "{journal}"
templates_dir = "{{{{journal_root}}}}/.nocturne/templates"
scan_folders = ["dreams"]
toc_file = "index.md"
"#,
        journal = journal.display(),
    );
    fs::write(&cfg_path, toml).unwrap();

    (cfg_path, journal)
}

pub fn noct(cfg_path: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("noct"));
    cmd.env("NO_COLOR", "1");
    cmd.args(["--config", cfg_path.to_str().unwrap(), "--profile", "default"]);
    cmd
}

pub fn write_entry(journal: &Path, name: &str, date: &str, body: &str) {
    let compact = date.replace('-', "");
    fs::write(
        journal.join("dreams").join(name),
        format!("> [!journal-entry] {date}\n> ^{compact}\n> {body}\n"),
    )
    .unwrap();
}
