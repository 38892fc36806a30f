//! Aggregator: grouped counts over a reference field.
//!
//! Powers the dashboard statistics endpoints: staff per department, visits
//! per patient, and the like. Groups are counted in the backend, sorted by
//! count descending, truncated to the top N, and then the group keys are
//! resolved to display names through the referenced collection.

use serde::Serialize;

use crate::core::DocumentStore;
use crate::error::{QueryError, StoreResult};
use crate::schema::ResourceSchema;
use crate::types::StoredDocument;

/// Name shown for a group whose key no longer resolves.
const UNKNOWN_GROUP: &str = "Unknown";

/// One group in an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// Display name of the referenced document.
    pub name: String,
    /// Number of documents in the group.
    pub count: u64,
}

/// Picks a human-readable label for a referenced document.
///
/// People get `firstName lastName`; named things get `name`; rooms get
/// `number`. Falls back to the id.
fn display_name(doc: &StoredDocument) -> String {
    match (doc.get_str("firstName"), doc.get_str("lastName")) {
        (Some(first), Some(last)) => return format!("{} {}", first, last),
        (Some(first), None) => return first.to_string(),
        _ => {}
    }
    if let Some(name) = doc.get_str("name") {
        return name.to_string();
    }
    if let Some(number) = doc.get_str("number") {
        return number.to_string();
    }
    doc.id().to_string()
}

/// Counts documents grouped by a reference field, resolving group keys to
/// display names.
///
/// `field` accepts snake_case aliases. The field must be a reference the
/// schema declares; grouping by an arbitrary field is rejected so the
/// endpoint cannot be used to probe document contents.
pub async fn count_by_reference<S>(
    store: &S,
    schema: &ResourceSchema,
    field: &str,
    limit: Option<usize>,
) -> StoreResult<Vec<GroupCount>>
where
    S: DocumentStore + ?Sized,
{
    let canonical = schema.canonical_field(field);
    let reference = schema
        .reference(canonical)
        .ok_or_else(|| QueryError::NotAReference {
            collection: schema.collection.to_string(),
            field: field.to_string(),
        })?;

    let groups = store
        .group_count(schema.collection, canonical, limit)
        .await?;

    let ids: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
    let resolved = store.read_batch(reference.target, &ids).await?;

    Ok(groups
        .iter()
        .map(|(id, count)| {
            let name = resolved
                .iter()
                .find(|doc| doc.id() == id)
                .map(display_name)
                .unwrap_or_else(|| UNKNOWN_GROUP.to_string());
            GroupCount {
                name,
                count: *count,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::sqlite::SqliteBackend;
    use crate::error::StoreError;
    use crate::schema;
    use serde_json::json;

    async fn backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    async fn seed_staffing(store: &SqliteBackend) -> (String, String) {
        let cardio = store
            .create("departments", json!({"name": "Cardiology"}))
            .await
            .unwrap();
        let onco = store
            .create("departments", json!({"name": "Oncology"}))
            .await
            .unwrap();
        for (n, dept) in [(3, cardio.id()), (1, onco.id())] {
            for i in 0..n {
                store
                    .create(
                        "staff",
                        json!({
                            "firstName": format!("S{}", i),
                            "lastName": "X",
                            "role": "nurse",
                            "departmentId": dept
                        }),
                    )
                    .await
                    .unwrap();
            }
        }
        (cardio.id().to_string(), onco.id().to_string())
    }

    #[tokio::test]
    async fn test_staff_per_department() {
        let store = backend().await;
        seed_staffing(&store).await;

        let schema = schema::by_path("staff").unwrap();
        let groups = count_by_reference(&store, schema, "departmentId", None)
            .await
            .unwrap();

        assert_eq!(
            groups,
            vec![
                GroupCount {
                    name: "Cardiology".to_string(),
                    count: 3
                },
                GroupCount {
                    name: "Oncology".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_limit_truncates_to_top_groups() {
        let store = backend().await;
        seed_staffing(&store).await;

        let schema = schema::by_path("staff").unwrap();
        let groups = count_by_reference(&store, schema, "departmentId", Some(1))
            .await
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Cardiology");
    }

    #[tokio::test]
    async fn test_unresolved_group_reports_unknown() {
        let store = backend().await;
        store
            .create(
                "staff",
                json!({"firstName": "A", "lastName": "B", "role": "nurse", "departmentId": "gone"}),
            )
            .await
            .unwrap();

        let schema = schema::by_path("staff").unwrap();
        let groups = count_by_reference(&store, schema, "departmentId", None)
            .await
            .unwrap();
        assert_eq!(groups[0].name, "Unknown");
        assert_eq!(groups[0].count, 1);
    }

    #[tokio::test]
    async fn test_snake_case_alias_accepted() {
        let store = backend().await;
        seed_staffing(&store).await;

        let schema = schema::by_path("staff").unwrap();
        let groups = count_by_reference(&store, schema, "department_id", None)
            .await
            .unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_non_reference_field_rejected() {
        let store = backend().await;
        let schema = schema::by_path("staff").unwrap();
        let err = count_by_reference(&store, schema, "role", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Query(QueryError::NotAReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_people_group_names_use_full_name() {
        let store = backend().await;
        let patient = store
            .create("patients", json!({"firstName": "Ada", "lastName": "Osei"}))
            .await
            .unwrap();
        store
            .create(
                "visits",
                json!({"patientId": patient.id(), "date": "2026-03-15"}),
            )
            .await
            .unwrap();

        let schema = schema::by_path("visits").unwrap();
        let groups = count_by_reference(&store, schema, "patientId", None)
            .await
            .unwrap();
        assert_eq!(groups[0].name, "Ada Osei");
    }
}
