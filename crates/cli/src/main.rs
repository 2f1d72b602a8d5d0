mod cmd;
mod completions;
mod logging;
mod prompt;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use nocturne_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "noct", version, about = "Markdown journal and dream diary toolkit")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List logical template names discovered under templates_dir
    ListTemplates,

    /// Render a template into a new journal entry
    New(NewArgs),

    /// Append an entry link to the TOC callout of the index note
    Toc(TocArgs),

    /// Parse entries from the scan folders and print the dashboard table
    Dashboard(DashboardArgs),

    /// Compute journaling statistics over the parsed entries
    Stats(StatsArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Logical template name (e.g. "daily" or "dreams/lucid")
    #[arg(long)]
    pub template: String,

    /// Output file path; defaults to <first scan folder>/<date>.md
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Entry date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Journal body text (prompted for when omitted)
    #[arg(long)]
    pub journal: Option<String>,

    /// Dream title
    #[arg(long)]
    pub dream_title: Option<String>,

    /// Dream content
    #[arg(long)]
    pub dream: Option<String>,

    /// Metric value as id=value; repeatable
    #[arg(long = "metric", value_parser = parse_key_val)]
    pub metrics: Vec<(String, String)>,

    /// Never prompt; omitted values stay empty
    #[arg(long)]
    pub batch: bool,

    /// Append a link for the new entry to the TOC note
    #[arg(long)]
    pub toc: bool,
}

#[derive(Debug, Args)]
pub struct TocArgs {
    /// Entry file the link points at, relative to journal_root
    #[arg(long)]
    pub entry: PathBuf,

    /// Link label; defaults to the bare link
    #[arg(long)]
    pub label: Option<String>,

    /// Append to the last matching TOC callout instead of the first
    #[arg(long)]
    pub last: bool,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Sort column: date | title | words | images
    #[arg(long, default_value = "date")]
    pub sort: String,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Date window: today | this-week | this-month | last-30-days | this-year | all-time
    #[arg(long, default_value = "all-time")]
    pub filter: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Date window: today | this-week | this-month | last-30-days | this-year | all-time
    #[arg(long, default_value = "all-time")]
    pub filter: String,

    /// Emit JSON instead of the text block
    #[arg(long)]
    pub json: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected id=value, got '{s}'"))
}

fn main() {
    let cli = Cli::parse();

    // Logging wants the resolved config; commands report load failures on
    // their own, so a failed load here just means default logging.
    if let Ok(cfg) = ConfigLoader::load(cli.config.as_deref(), cli.profile.as_deref()) {
        logging::init(&cfg);
    }

    match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref());
        }
        Commands::ListTemplates => {
            cmd::list_templates::run(cli.config.as_deref(), cli.profile.as_deref());
        }
        Commands::New(args) => {
            cmd::new::run(cli.config.as_deref(), cli.profile.as_deref(), args);
        }
        Commands::Toc(args) => {
            cmd::toc::run(cli.config.as_deref(), cli.profile.as_deref(), args);
        }
        Commands::Dashboard(args) => {
            cmd::dashboard::run(cli.config.as_deref(), cli.profile.as_deref(), args);
        }
        Commands::Stats(args) => {
            cmd::stats::run(cli.config.as_deref(), cli.profile.as_deref(), args);
        }
        Commands::Completions { shell } => {
            completions::generate(shell);
        }
    }
}
