//! Command implementations for the CLI interface.
//!
//! Report commands load the data source, run the pipeline for their kind and
//! translate the result into an exit code.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use clap_complete::{generate, Shell};
use tracing::{debug, error, info};

use crate::config::ReportConfig;
use crate::db::Snapshot;
use crate::error::{ReportError, SourceError};
use crate::fields::ENTITY_TASK;
use crate::report::{run_report, AssetReport, ReportKind, ReportRequest, RunOutcome, ShotReport};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a csv report for Shot tasks.
    Shot(ReportArgs),

    /// Generate a csv report for Asset tasks.
    Asset(ReportArgs),

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Path the report is written to. Parent directories are created if missing.
    pub path: PathBuf,
    /// Id of the project entity to report on.
    pub project_id: u64,
}

/// Generate the Shot report.
pub fn cmd_shot(config: &ReportConfig, args: ReportArgs) -> i32 {
    cmd_report::<ShotReport>(config, args)
}

/// Generate the Asset report.
pub fn cmd_asset(config: &ReportConfig, args: ReportArgs) -> i32 {
    cmd_report::<AssetReport>(config, args)
}

fn run<K: ReportKind>(config: &ReportConfig, request: &ReportRequest) -> Result<RunOutcome, ReportError> {
    let path = config.source.as_ref().ok_or(SourceError::NotConfigured)?;
    let source = Snapshot::load(path)?;
    debug!("Loaded snapshot {} ({} tasks).", path.display(), source.count(ENTITY_TASK));
    run_report::<K>(&source, request)
}

fn cmd_report<K: ReportKind>(config: &ReportConfig, args: ReportArgs) -> i32 {
    info!("Project id: {}", args.project_id);

    let request = ReportRequest {
        in_progress: config.in_progress_status.clone(),
        ..ReportRequest::new(args.path, args.project_id)
    };

    match run::<K>(config, &request) {
        Ok(RunOutcome::Written { path, rows }) => {
            info!("{} report successfully generated ({} rows): {}", K::LABEL, rows, path.display());
            EXIT_SUCCESS
        }
        Ok(RunOutcome::ProjectNotFound { project_id }) => {
            info!("Unable to create {} report csv for project {}.", K::LABEL, project_id);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Report generator failed with error: {e}");
            EXIT_FAILURE
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
