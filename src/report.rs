//! Report generation pipeline.
//!
//! One generic pipeline serves both report kinds:
//!
//! 1. resolve the project,
//! 2. fetch every task of the kind linked to it,
//! 3. derive the set of entity names considered "in production",
//! 4. project each task into a fixed-column [`ReportRow`],
//! 5. write the rows to CSV.
//!
//! The kind-specific parts (fields, header, production rule) are captured by
//! [`ReportKind`], implemented by [`ShotReport`] and [`AssetReport`].

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, info_span, warn, Span};

use crate::db::{DataSource, Filter};
use crate::error::ReportError;
use crate::export::{ensure_parent_dir, write_csv};
use crate::fields::*;
use crate::project::resolve_project;
use crate::task::{decode_records, AssetTask, ProductionShot, Project, ShotTask, TaskRecord};

/// One output line: column label to string value, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportRow {
    cells: Vec<(&'static str, String)>,
}

impl ReportRow {
    pub fn from_cells(cells: Vec<(&'static str, String)>) -> Self {
        ReportRow { cells }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(l, _)| *l)
    }
}

/// Descriptor of a report kind.
pub trait ReportKind {
    type Task: TaskRecord;

    /// Human name, used in log messages.
    const LABEL: &'static str;
    /// Entity type the tasks are linked to.
    const ENTITY_TYPE: &'static str;
    const TASK_FIELDS: &'static [&'static str];
    const HEADER: [&'static str; 10];
    const ENTITY_COLUMN: &'static str;
    const SECONDARY_COLUMN: &'static str;
    const PRODUCTION_COLUMN: &'static str;

    /// Span the run's events are recorded under.
    fn span() -> Span;

    /// Names of the entities considered in production.
    fn production_set(
        source: &dyn DataSource,
        project: &Project,
        tasks: &[Self::Task],
        in_progress: &str,
    ) -> Result<HashSet<String>, ReportError>;
}

/// Tasks linked to Shots.
#[derive(Debug, Clone, Copy)]
pub struct ShotReport;

/// Tasks linked to Assets.
#[derive(Debug, Clone, Copy)]
pub struct AssetReport;

impl ReportKind for ShotReport {
    type Task = ShotTask;

    const LABEL: &'static str = "Shot";
    const ENTITY_TYPE: &'static str = ENTITY_SHOT;
    const TASK_FIELDS: &'static [&'static str] = SHOT_TASK_FIELDS;
    const HEADER: [&'static str; 10] = SHOT_HEADER;
    const ENTITY_COLUMN: &'static str = SHOT_NAME;
    const SECONDARY_COLUMN: &'static str = SEQ_NAME;
    const PRODUCTION_COLUMN: &'static str = PROD_SHOT;

    fn span() -> Span {
        info_span!("shot_report")
    }

    fn production_set(
        _source: &dyn DataSource,
        _project: &Project,
        tasks: &[ShotTask],
        in_progress: &str,
    ) -> Result<HashSet<String>, ReportError> {
        Ok(production_shots(tasks, in_progress))
    }
}

impl ReportKind for AssetReport {
    type Task = AssetTask;

    const LABEL: &'static str = "Asset";
    const ENTITY_TYPE: &'static str = ENTITY_ASSET;
    const TASK_FIELDS: &'static [&'static str] = ASSET_TASK_FIELDS;
    const HEADER: [&'static str; 10] = ASSET_HEADER;
    const ENTITY_COLUMN: &'static str = ASSET_NAME;
    const SECONDARY_COLUMN: &'static str = ASSET_TYPE;
    const PRODUCTION_COLUMN: &'static str = PROD_ASSET;

    fn span() -> Span {
        info_span!("asset_report")
    }

    fn production_set(
        source: &dyn DataSource,
        project: &Project,
        tasks: &[AssetTask],
        in_progress: &str,
    ) -> Result<HashSet<String>, ReportError> {
        let shots = fetch_production_shots(source, project, in_progress)?;
        debug!("Got {} production shots.", shots.len());
        Ok(production_assets(&shots, tasks, in_progress))
    }
}

/// Shots whose own status and whose sequence status are both in progress.
pub fn production_shots(tasks: &[ShotTask], in_progress: &str) -> HashSet<String> {
    tasks
        .iter()
        .filter(|t| t.shot_status.as_deref() == Some(in_progress))
        .filter(|t| t.sequence_status.as_deref() == Some(in_progress))
        .filter_map(|t| t.shot_name.clone())
        .collect()
}

/// Assets linked to a production shot that are themselves in progress.
///
/// Assets not linked to any production shot are never included, whatever
/// their own status.
pub fn production_assets(shots: &[ProductionShot], tasks: &[AssetTask], in_progress: &str) -> HashSet<String> {
    let linked: HashSet<&str> = shots
        .iter()
        .flat_map(|shot| shot.assets.iter().flatten())
        .filter_map(|asset| asset.name.as_deref())
        .collect();

    tasks
        .iter()
        .filter(|t| t.asset_status.as_deref() == Some(in_progress))
        .filter_map(|t| t.asset_name.as_deref())
        .filter(|name| !name.is_empty() && linked.contains(name))
        .map(str::to_string)
        .collect()
}

/// Query the project's shots that are in progress inside an in-progress sequence.
pub fn fetch_production_shots(
    source: &dyn DataSource,
    project: &Project,
    in_progress: &str,
) -> Result<Vec<ProductionShot>, ReportError> {
    let filters = [
        Filter::is(FIELD_PROJECT, project.link()),
        Filter::is(FIELD_STATUS, in_progress),
        Filter::is(FIELD_SEQ_STATUS, in_progress),
    ];
    let records = source.find(ENTITY_SHOT, &filters, PRODUCTION_SHOT_FIELDS)?;
    decode_records(ENTITY_SHOT, records)
}

/// Query every task of the kind linked to the project, in service order.
pub fn fetch_tasks<K: ReportKind>(source: &dyn DataSource, project: &Project) -> Result<Vec<K::Task>, ReportError> {
    let filters = [
        Filter::is(FIELD_PROJECT, project.link()),
        Filter::type_is(FIELD_ENTITY, K::ENTITY_TYPE),
    ];
    let records = source.find(ENTITY_TASK, &filters, K::TASK_FIELDS)?;
    decode_records(ENTITY_TASK, records)
}

/// Build one row per task, in input order.
pub fn project_rows<K: ReportKind>(tasks: &[K::Task], production: &HashSet<String>) -> Vec<ReportRow> {
    tasks
        .iter()
        .map(|task| {
            let core = task.core();
            let name = task.entity_name();
            let in_production = name.is_some_and(|n| production.contains(n));
            let value = |v: Option<&str>| v.unwrap_or("").to_string();

            let mut cells = Vec::with_capacity(K::HEADER.len());
            for label in K::HEADER {
                let cell = match label {
                    ID => core.id.to_string(),
                    TASK_NAME => value(core.content.as_deref()),
                    STEP => core.step_name().to_string(),
                    TASK_STATUS => value(core.status.as_deref()),
                    START_DATE => core.start_date_text(),
                    DUE_DATE => core.due_date_text(),
                    TAGS => core.joined_tags(),
                    l if l == K::ENTITY_COLUMN => value(name),
                    l if l == K::SECONDARY_COLUMN => value(task.secondary()),
                    l if l == K::PRODUCTION_COLUMN => (if in_production { "True" } else { "False" }).to_string(),
                    _ => String::new(),
                };
                cells.push((label, cell));
            }
            ReportRow::from_cells(cells)
        })
        .collect()
}

/// Parameters of a single report run.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub path: PathBuf,
    pub project_id: u64,
    /// Status code treated as "in progress".
    pub in_progress: String,
}

impl ReportRequest {
    pub fn new(path: impl Into<PathBuf>, project_id: u64) -> Self {
        ReportRequest {
            path: path.into(),
            project_id,
            in_progress: IN_PROGRESS.to_string(),
        }
    }
}

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written { path: PathBuf, rows: usize },
    /// The project id did not resolve; no file was written.
    ProjectNotFound { project_id: u64 },
}

/// Run the full pipeline for one report kind.
pub fn run_report<K: ReportKind>(source: &dyn DataSource, request: &ReportRequest) -> Result<RunOutcome, ReportError> {
    let span = K::span();
    let _enter = span.enter();

    info!("Starting {} Report generation.", K::LABEL);

    let Some(project) = resolve_project(source, request.project_id)? else {
        warn!("Could not find project from the given ID. Exiting.");
        return Ok(RunOutcome::ProjectNotFound { project_id: request.project_id });
    };

    info!(
        "Getting all {} tasks for project {} from the data source.",
        K::LABEL.to_lowercase(),
        project.display_name()
    );
    let tasks = fetch_tasks::<K>(source, &project)?;
    info!("Got {} {} tasks.", tasks.len(), K::LABEL.to_lowercase());

    let production = K::production_set(source, &project, &tasks, &request.in_progress)?;
    debug!("Got {} production {}s.", production.len(), K::LABEL.to_lowercase());

    info!("Compiling report.");
    let rows = project_rows::<K>(&tasks, &production);

    info!("Writing report to csv");
    if let Some(dir) = ensure_parent_dir(&request.path)? {
        debug!("Created directory: {}", dir.display());
    }
    write_csv(&request.path, &K::HEADER, &rows)?;

    Ok(RunOutcome::Written {
        path: request.path.clone(),
        rows: rows.len(),
    })
}
