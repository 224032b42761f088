use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "consoletrack")]
#[command(about = "Track prices and stock of a console-game webshop listing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape the listing, merge results into the store, and report
    Scan(ScanArgs),

    /// Print the availability report from the persisted store
    Report(ReportArgs),

    /// Print what the most recent recorded run changed
    Changes(ChangesArgs),
}

#[derive(Parser)]
pub struct ScanArgs {
    /// Base listing URL; page N is fetched from {base}/oldal-N
    #[arg(long)]
    pub base_url: Option<String>,

    /// Store file path (defaults to the platform data directory)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Serve pages from a local cache instead of fetching live (unimplemented)
    #[arg(long, default_value_t = false)]
    pub cached: bool,

    /// Output reports as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Show page-by-page progress on stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Store file path (defaults to the platform data directory)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ChangesArgs {
    /// Store file path (defaults to the platform data directory)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
