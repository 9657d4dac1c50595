//! # sg-report - Production task CSV reports
//!
//! Generates tabular status reports for Shot and Asset tasks tracked in a
//! production-management service.
//!
//! ## Key Features
//!
//! - **Two report kinds**: `shot` and `asset`, sharing one pipeline
//! - **Production flag**: every row says whether its Shot/Asset is "in production"
//!   - a Shot is in production when it and its Sequence are both in progress
//!   - an Asset is in production when it is in progress and linked to a production Shot
//! - **Plain CSV output**: fixed column order, one row per task in service order
//!
//! ## Quick Start
//!
//! ```bash
//! # Shot task report for project 85
//! sg-report --source snapshot.json shot reports/shots.csv 85
//!
//! # Asset task report, treating "act" as the in-progress status
//! sg-report --source snapshot.json --status act asset reports/assets.csv 85
//! ```
//!
//! Settings live in `~/.sg_report/config.json`; logs are written to
//! `~/.sg_report/logs/sg_report.log` unless configured otherwise.
//!
//! Exit code is 0 when the report was written or the project could not be
//! found, 1 when the run failed.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod fields;
pub mod logging;
pub mod project;
pub mod report;
pub mod task;

use cli::Cli;
use cmd::*;
use config::{default_config_path, ReportConfig};

fn main() {
    let cli = Cli::parse();

    // Completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = ReportConfig::load_from(&config_path).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(EXIT_FAILURE);
    });
    if let Some(source) = cli.source {
        config.source = Some(source);
    }
    if let Some(status) = cli.status {
        config.in_progress_status = status;
    }

    let guard = logging::init_logging(&config.log_dir, &config.log_file, cli.verbose).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(EXIT_FAILURE);
    });

    let code = match cli.command {
        Commands::Shot(args) => cmd_shot(&config, args),
        Commands::Asset(args) => cmd_asset(&config, args),
        Commands::Completions { .. } => unreachable!("Completions command handled above"),
    };

    // exit() skips destructors; flush the log file first.
    drop(guard);
    std::process::exit(code);
}
