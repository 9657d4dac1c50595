use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Generate CSV status reports for Shot and Asset tasks.
/// Settings default to ~/.sg_report/config.json or a path passed via --config.
#[derive(Parser)]
#[command(name = "sg-report", version, about = "Production task CSV reports")]
pub struct Cli {
    /// Path to the JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file to query (overrides the config file).
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Status code treated as "in progress" (overrides the config file).
    #[arg(long, global = true)]
    pub status: Option<String>,

    /// Print debug messages to the console.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
