//! Project lookup.
//!
//! A report is always scoped to one project; the project is resolved from its
//! numeric id before any task is fetched.

use crate::db::{DataSource, Filter};
use crate::error::ReportError;
use crate::fields::{ENTITY_PROJECT, FIELD_ID, FIELD_NAME};
use crate::task::{decode_records, Project};

/// Resolve a project entity from its id. `Ok(None)` when no such project exists.
pub fn resolve_project(source: &dyn DataSource, project_id: u64) -> Result<Option<Project>, ReportError> {
    let found = source.find_one(ENTITY_PROJECT, &[Filter::is(FIELD_ID, project_id)], &[FIELD_NAME])?;
    match found {
        Some(record) => Ok(decode_records::<Project>(ENTITY_PROJECT, vec![record])?.pop()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Snapshot;
    use serde_json::json;

    #[test]
    fn test_resolve_project() {
        let db = Snapshot::from_value(json!({
            "Project": [{"id": 85, "name": "Demo"}, {"id": 86, "name": "Other"}]
        }))
        .unwrap();

        let project = resolve_project(&db, 86).unwrap().unwrap();
        assert_eq!(project.id, 86);
        assert_eq!(project.display_name(), "Other");
        assert_eq!(project.link(), json!({"type": "Project", "id": 86}));
    }

    #[test]
    fn test_missing_project_is_not_an_error() {
        let db = Snapshot::default();
        assert!(resolve_project(&db, 85).unwrap().is_none());
    }
}
