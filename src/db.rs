//! Data source access for report generation.
//!
//! This module defines the narrow query surface the reports depend on
//! (`find` / `find_one` with equality filters and a field list) and the
//! `Snapshot` source, which answers those queries from a JSON export of the
//! production-tracking service.
//!
//! A snapshot file maps entity types to arrays of flat records. Keys are the
//! service's field names, dotted paths included:
//!
//! ```json
//! {
//!   "Project": [{"id": 85, "name": "Demo"}],
//!   "Task": [{"id": 1, "project": {"type": "Project", "id": 85},
//!             "entity": {"type": "Shot", "id": 9, "name": "s0010"},
//!             "entity.Shot.code": "s0010"}]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SourceError;
use crate::fields::{FIELD_ID, FIELD_TYPE};

/// A flat record as returned by the service.
pub type Record = serde_json::Map<String, Value>;

/// A single query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value. Entity links compare by type and id only.
    Is { field: String, value: Value },
    /// Field is an entity link of the given type.
    TypeIs { field: String, entity_type: String },
}

impl Filter {
    pub fn is(field: &str, value: impl Into<Value>) -> Self {
        Filter::Is { field: field.to_string(), value: value.into() }
    }

    pub fn type_is(field: &str, entity_type: &str) -> Self {
        Filter::TypeIs { field: field.to_string(), entity_type: entity_type.to_string() }
    }

    /// Evaluate the predicate against a stored record.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Is { field, value } => record
                .get(field)
                .map(|stored| values_equal(stored, value))
                .unwrap_or(false),
            Filter::TypeIs { field, entity_type } => record
                .get(field)
                .and_then(|stored| stored.get(FIELD_TYPE))
                .and_then(Value::as_str)
                .map(|t| t == entity_type)
                .unwrap_or(false),
        }
    }
}

fn link_key(value: &Value) -> Option<(&Value, &Value)> {
    let obj = value.as_object()?;
    Some((obj.get(FIELD_TYPE)?, obj.get(FIELD_ID)?))
}

fn values_equal(stored: &Value, wanted: &Value) -> bool {
    match (link_key(stored), link_key(wanted)) {
        (Some(a), Some(b)) => a == b,
        _ => stored == wanted,
    }
}

/// Query capability over the production-tracking service.
pub trait DataSource {
    /// All records of `entity_type` matching every filter, restricted to `fields`
    /// (plus `type` and `id`).
    fn find(&self, entity_type: &str, filters: &[Filter], fields: &[&str]) -> Result<Vec<Record>, SourceError>;

    /// First matching record, if any.
    fn find_one(
        &self,
        entity_type: &str,
        filters: &[Filter],
        fields: &[&str],
    ) -> Result<Option<Record>, SourceError> {
        Ok(self.find(entity_type, filters, fields)?.into_iter().next())
    }
}

/// In-memory export of the service, keyed by entity type.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entities: BTreeMap<String, Vec<Record>>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let data = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a snapshot from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Number of stored records of the given type.
    pub fn count(&self, entity_type: &str) -> usize {
        self.entities.get(entity_type).map(Vec::len).unwrap_or(0)
    }
}

impl DataSource for Snapshot {
    fn find(&self, entity_type: &str, filters: &[Filter], fields: &[&str]) -> Result<Vec<Record>, SourceError> {
        let Some(records) = self.entities.get(entity_type) else {
            return Ok(Vec::new());
        };

        Ok(records
            .iter()
            .filter(|record| filters.iter().all(|f| f.matches(record)))
            .map(|record| {
                let mut out = Record::new();
                out.insert(FIELD_TYPE.to_string(), Value::from(entity_type));
                out.insert(FIELD_ID.to_string(), record.get(FIELD_ID).cloned().unwrap_or(Value::Null));
                for &field in fields {
                    out.insert(field.to_string(), record.get(field).cloned().unwrap_or(Value::Null));
                }
                out
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn snapshot() -> Snapshot {
        Snapshot::from_value(json!({
            "Project": [
                {"id": 85, "name": "Demo", "sg_status": "Active"}
            ],
            "Task": [
                {"id": 1, "content": "comp", "project": {"type": "Project", "id": 85, "name": "Demo"},
                 "entity": {"type": "Shot", "id": 10}},
                {"id": 2, "content": "model", "project": {"type": "Project", "id": 85},
                 "entity": {"type": "Asset", "id": 20}},
                {"id": 3, "content": "comp", "project": {"type": "Project", "id": 86},
                 "entity": {"type": "Shot", "id": 11}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_filters_by_link_and_type() {
        let db = snapshot();
        let filters = [
            Filter::is("project", json!({"type": "Project", "id": 85})),
            Filter::type_is("entity", "Shot"),
        ];

        let found = db.find("Task", &filters, &["content"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"], json!(1));
        assert_eq!(found[0]["type"], json!("Task"));
        assert_eq!(found[0]["content"], json!("comp"));
    }

    #[test]
    fn test_find_returns_only_requested_fields() {
        let db = snapshot();
        let found = db.find("Project", &[], &["name", "missing"]).unwrap();

        let keys: Vec<&str> = found[0].keys().map(String::as_str).collect();
        assert!(keys.contains(&"name"));
        assert!(!keys.contains(&"sg_status"));
        assert_eq!(found[0]["missing"], Value::Null);
    }

    #[test]
    fn test_find_one_absent() {
        let db = snapshot();
        let found = db.find_one("Project", &[Filter::is("id", 999)], &["name"]).unwrap();
        assert!(found.is_none());
        assert!(db.find("Shot", &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_find_preserves_stored_order() {
        let db = snapshot();
        let ids: Vec<Value> = db
            .find("Task", &[], &[])
            .unwrap()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"Shot": [{"id": 1, "code": "s0010"}]})).unwrap();

        let db = Snapshot::load(file.path()).unwrap();
        assert_eq!(db.count("Shot"), 1);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Snapshot::load(&missing), Err(SourceError::Read { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2").unwrap();
        assert!(matches!(Snapshot::load(&bad), Err(SourceError::Parse { .. })));
    }
}
