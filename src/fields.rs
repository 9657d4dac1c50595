//! Report vocabulary: column labels, header orders and service field names.
//!
//! Everything the pipeline needs to know about names lives here, so the
//! report kinds in [`crate::report`] only reference constants.

/// Status code the service uses for work that is actively in progress.
pub const IN_PROGRESS: &str = "ip";

// Column labels.
pub const ID: &str = "ID";
pub const TASK_NAME: &str = "Task Name";
pub const STEP: &str = "Step";
pub const TASK_STATUS: &str = "Task Status";
pub const SHOT_NAME: &str = "Shot Name";
pub const PROD_SHOT: &str = "Production Shot";
pub const SEQ_NAME: &str = "Sequence Name";
pub const ASSET_NAME: &str = "Asset Name";
pub const PROD_ASSET: &str = "Production Asset";
pub const ASSET_TYPE: &str = "Asset Type";
pub const START_DATE: &str = "Start Date";
pub const DUE_DATE: &str = "Due Date";
pub const TAGS: &str = "Tags";

/// Column order of the Shot report.
pub const SHOT_HEADER: [&str; 10] = [
    ID,
    TASK_NAME,
    STEP,
    TASK_STATUS,
    SHOT_NAME,
    PROD_SHOT,
    SEQ_NAME,
    START_DATE,
    DUE_DATE,
    TAGS,
];

/// Column order of the Asset report.
pub const ASSET_HEADER: [&str; 10] = [
    ID,
    TASK_NAME,
    STEP,
    TASK_STATUS,
    ASSET_NAME,
    PROD_ASSET,
    ASSET_TYPE,
    START_DATE,
    DUE_DATE,
    TAGS,
];

// Entity types.
pub const ENTITY_PROJECT: &str = "Project";
pub const ENTITY_TASK: &str = "Task";
pub const ENTITY_SHOT: &str = "Shot";
pub const ENTITY_ASSET: &str = "Asset";

// Plain fields.
pub const FIELD_ID: &str = "id";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_NAME: &str = "name";
pub const FIELD_CODE: &str = "code";
pub const FIELD_PROJECT: &str = "project";
pub const FIELD_ENTITY: &str = "entity";
pub const FIELD_STATUS: &str = "sg_status_list";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_STEP: &str = "step";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_DUE_DATE: &str = "due_date";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_ASSETS: &str = "assets";
pub const FIELD_SEQ_STATUS: &str = "sg_sequence.Sequence.sg_status_list";

// Fields reached through a task's parent entity.
pub const TASK_SHOT_NAME: &str = "entity.Shot.code";
pub const TASK_SHOT_STATUS: &str = "entity.Shot.sg_status_list";
pub const TASK_SHOT_SEQ_NAME: &str = "entity.Shot.sg_sequence.Sequence.code";
pub const TASK_SHOT_SEQ_STATUS: &str = "entity.Shot.sg_sequence.Sequence.sg_status_list";
pub const TASK_ASSET_NAME: &str = "entity.Asset.code";
pub const TASK_ASSET_STATUS: &str = "entity.Asset.sg_status_list";
pub const TASK_ASSET_TYPE: &str = "entity.Asset.sg_asset_type";

/// Fields requested for Shot tasks.
pub const SHOT_TASK_FIELDS: &[&str] = &[
    FIELD_STATUS,
    FIELD_STEP,
    FIELD_CONTENT,
    FIELD_START_DATE,
    FIELD_DUE_DATE,
    FIELD_ENTITY,
    FIELD_TAGS,
    TASK_SHOT_STATUS,
    TASK_SHOT_NAME,
    TASK_SHOT_SEQ_STATUS,
    TASK_SHOT_SEQ_NAME,
];

/// Fields requested for Asset tasks.
pub const ASSET_TASK_FIELDS: &[&str] = &[
    FIELD_STATUS,
    FIELD_STEP,
    FIELD_CONTENT,
    FIELD_START_DATE,
    FIELD_DUE_DATE,
    FIELD_ENTITY,
    FIELD_TAGS,
    TASK_ASSET_STATUS,
    TASK_ASSET_NAME,
    TASK_ASSET_TYPE,
];

/// Fields requested for production shots.
pub const PRODUCTION_SHOT_FIELDS: &[&str] = &[FIELD_CODE, FIELD_STATUS, FIELD_SEQ_STATUS, FIELD_ASSETS];
