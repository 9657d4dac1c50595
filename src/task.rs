//! Typed task records decoded from data-source records.
//!
//! The service returns flat records keyed by field name, with nested parent
//! fields addressed by dotted paths (`entity.Shot.code`). These structs give
//! those records names and types; any field may be `null` except `id`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::Record;
use crate::error::ReportError;
use crate::fields::*;

/// Reference to another entity, as embedded in a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLink {
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A project entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    /// Link form used in `project is ...` filters.
    pub fn link(&self) -> serde_json::Value {
        serde_json::json!({ "type": ENTITY_PROJECT, "id": self.id })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Fields shared by every task regardless of the parent entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCore {
    pub id: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub step: Option<EntityLink>,
    #[serde(rename = "sg_status_list", default)]
    pub status: Option<String>,
    /// Dates are kept as the service sent them.
    #[serde(default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub due_date: Option<Value>,
    #[serde(default)]
    pub tags: Option<Vec<EntityLink>>,
}

impl TaskCore {
    pub fn step_name(&self) -> &str {
        self.step
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    pub fn start_date_text(&self) -> String {
        raw_text(self.start_date.as_ref())
    }

    pub fn due_date_text(&self) -> String {
        raw_text(self.due_date.as_ref())
    }

    /// Tag names joined with ", ", empty when there are none.
    pub fn joined_tags(&self) -> String {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.name.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// String form of a raw field value; null becomes empty.
fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A task whose parent entity is a Shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTask {
    #[serde(flatten)]
    pub core: TaskCore,
    #[serde(rename = "entity.Shot.code", default)]
    pub shot_name: Option<String>,
    #[serde(rename = "entity.Shot.sg_status_list", default)]
    pub shot_status: Option<String>,
    #[serde(rename = "entity.Shot.sg_sequence.Sequence.code", default)]
    pub sequence_name: Option<String>,
    #[serde(rename = "entity.Shot.sg_sequence.Sequence.sg_status_list", default)]
    pub sequence_status: Option<String>,
}

/// A task whose parent entity is an Asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTask {
    #[serde(flatten)]
    pub core: TaskCore,
    #[serde(rename = "entity.Asset.code", default)]
    pub asset_name: Option<String>,
    #[serde(rename = "entity.Asset.sg_status_list", default)]
    pub asset_status: Option<String>,
    #[serde(rename = "entity.Asset.sg_asset_type", default)]
    pub asset_type: Option<String>,
}

/// A Shot that is itself in progress inside an in-progress Sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionShot {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub assets: Option<Vec<EntityLink>>,
}

/// Access to the parts of a task record the report rows are built from.
pub trait TaskRecord: DeserializeOwned {
    fn core(&self) -> &TaskCore;
    /// Name of the parent Shot or Asset.
    fn entity_name(&self) -> Option<&str>;
    /// Sequence name for shots, asset type for assets.
    fn secondary(&self) -> Option<&str>;
}

impl TaskRecord for ShotTask {
    fn core(&self) -> &TaskCore {
        &self.core
    }

    fn entity_name(&self) -> Option<&str> {
        self.shot_name.as_deref()
    }

    fn secondary(&self) -> Option<&str> {
        self.sequence_name.as_deref()
    }
}

impl TaskRecord for AssetTask {
    fn core(&self) -> &TaskCore {
        &self.core
    }

    fn entity_name(&self) -> Option<&str> {
        self.asset_name.as_deref()
    }

    fn secondary(&self) -> Option<&str> {
        self.asset_type.as_deref()
    }
}

/// Decode raw records into typed ones, keeping their order.
pub fn decode_records<T: DeserializeOwned>(
    entity_type: &str,
    records: Vec<Record>,
) -> Result<Vec<T>, ReportError> {
    records
        .into_iter()
        .map(|record| {
            let id = record.get(FIELD_ID).cloned().unwrap_or_default();
            serde_json::from_value(serde_json::Value::Object(record)).map_err(|source| {
                ReportError::Decode {
                    entity_type: entity_type.to_string(),
                    id: id.to_string(),
                    source,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_decode_shot_task_with_dotted_fields() {
        let tasks: Vec<ShotTask> = decode_records(
            ENTITY_TASK,
            vec![record(json!({
                "type": "Task",
                "id": 1234,
                "content": "animationBlocking",
                "step": {"type": "Step", "id": 3, "name": "animation"},
                "sg_status_list": "ip",
                "start_date": "2021-02-25",
                "due_date": null,
                "tags": [{"type": "Tag", "id": 1, "name": "fx"}],
                "entity.Shot.code": "s0500",
                "entity.Shot.sg_status_list": "ip",
                "entity.Shot.sg_sequence.Sequence.code": "sq1500",
                "entity.Shot.sg_sequence.Sequence.sg_status_list": "wtg"
            }))],
        )
        .unwrap();

        let task = &tasks[0];
        assert_eq!(task.core.id, 1234);
        assert_eq!(task.core.step_name(), "animation");
        assert_eq!(task.core.start_date_text(), "2021-02-25");
        assert_eq!(task.core.due_date, None);
        assert_eq!(task.core.due_date_text(), "");
        assert_eq!(task.shot_name.as_deref(), Some("s0500"));
        assert_eq!(task.sequence_status.as_deref(), Some("wtg"));
    }

    #[test]
    fn test_nulls_are_tolerated() {
        let tasks: Vec<AssetTask> = decode_records(
            ENTITY_TASK,
            vec![record(json!({
                "id": 7,
                "content": null,
                "step": null,
                "tags": null,
                "entity.Asset.code": null
            }))],
        )
        .unwrap();

        let task = &tasks[0];
        assert_eq!(task.core.step_name(), "");
        assert_eq!(task.core.joined_tags(), "");
        assert_eq!(task.entity_name(), None);
    }

    #[test]
    fn test_joined_tags() {
        let mut core: TaskCore = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(core.joined_tags(), "");

        core.tags = Some(vec![
            EntityLink { name: Some("fx".into()), ..Default::default() },
            EntityLink { name: Some("lighting".into()), ..Default::default() },
        ]);
        assert_eq!(core.joined_tags(), "fx, lighting");
    }

    #[test]
    fn test_dates_pass_through_unparsed() {
        let core: TaskCore = serde_json::from_value(json!({
            "id": 1,
            "start_date": "2021-02-25 09:00:00",
            "due_date": 20210305
        }))
        .unwrap();

        assert_eq!(core.start_date_text(), "2021-02-25 09:00:00");
        assert_eq!(core.due_date_text(), "20210305");
    }

    #[test]
    fn test_decode_failure_names_the_record() {
        let result: Result<Vec<ShotTask>, _> =
            decode_records(ENTITY_TASK, vec![record(json!({"id": 99, "content": 5}))]);

        match result {
            Err(ReportError::Decode { entity_type, id, .. }) => {
                assert_eq!(entity_type, "Task");
                assert_eq!(id, "99");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
