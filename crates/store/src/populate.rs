//! Relation populator.
//!
//! After a page of documents is fetched, each reference field declared by the
//! schema is resolved into an embedded display object: `staffId` embeds a
//! `staff` sub-object carrying the projection fields (`firstName`,
//! `lastName`, ...). Resolution is batched per target collection, one read
//! batch per reference field per page. A dangling reference embeds `null`
//! rather than erroring.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

use crate::core::DocumentStore;
use crate::error::StoreResult;
use crate::schema::{ReferenceDef, ResourceSchema};
use crate::types::StoredDocument;

/// Projects a referenced document down to its display fields plus `id`.
fn project(reference: &ReferenceDef, doc: &StoredDocument) -> Value {
    let mut out = Map::new();
    out.insert("id".to_string(), Value::String(doc.id().to_string()));
    for field in reference.projection {
        if let Some(value) = doc.content().get(*field) {
            out.insert((*field).to_string(), value.clone());
        }
    }
    Value::Object(out)
}

/// Resolves every declared reference on a batch of documents in place.
///
/// Documents that do not carry a reference field are left untouched; a
/// reference id that does not resolve embeds `null`.
pub async fn populate<S>(
    store: &S,
    schema: &ResourceSchema,
    docs: &mut [StoredDocument],
) -> StoreResult<()>
where
    S: DocumentStore + ?Sized,
{
    for reference in schema.references {
        let ids: BTreeSet<String> = docs
            .iter()
            .filter_map(|doc| doc.get_str(reference.field))
            .map(String::from)
            .collect();
        if ids.is_empty() {
            continue;
        }

        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let resolved: HashMap<String, Value> = store
            .read_batch(reference.target, &id_refs)
            .await?
            .iter()
            .map(|doc| (doc.id().to_string(), project(reference, doc)))
            .collect();

        let key = reference.embed_key();
        for doc in docs.iter_mut() {
            let Some(target_id) = doc.get_str(reference.field).map(String::from) else {
                continue;
            };
            let embedded = resolved.get(&target_id).cloned().unwrap_or(Value::Null);
            if let Some(obj) = doc.content_mut().as_object_mut() {
                obj.insert(key.clone(), embedded);
            }
        }
    }
    Ok(())
}

/// Resolves references on a single document.
pub async fn populate_one<S>(
    store: &S,
    schema: &ResourceSchema,
    doc: &mut StoredDocument,
) -> StoreResult<()>
where
    S: DocumentStore + ?Sized,
{
    populate(store, schema, std::slice::from_mut(doc)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::sqlite::SqliteBackend;
    use crate::schema;
    use serde_json::json;

    async fn backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    #[tokio::test]
    async fn test_populates_references_with_projection() {
        let store = backend().await;
        let patient = store
            .create(
                "patients",
                json!({
                    "firstName": "Ada",
                    "lastName": "Osei",
                    "email": "ada@example.com",
                    "bloodGroup": "O+"
                }),
            )
            .await
            .unwrap();
        let staff = store
            .create(
                "staff",
                json!({"firstName": "Grace", "lastName": "Chen", "role": "doctor"}),
            )
            .await
            .unwrap();
        let mut appointment = store
            .create(
                "appointments",
                json!({
                    "patientId": patient.id(),
                    "staffId": staff.id(),
                    "date": "2026-03-15",
                    "status": "scheduled"
                }),
            )
            .await
            .unwrap();

        let schema = schema::by_path("appointments").unwrap();
        populate_one(&store, schema, &mut appointment).await.unwrap();

        let patient_embed = &appointment.content()["patient"];
        assert_eq!(patient_embed["firstName"], "Ada");
        assert_eq!(patient_embed["id"], patient.id());
        // Projection carries display fields only.
        assert!(patient_embed.get("bloodGroup").is_none());

        let staff_embed = &appointment.content()["staff"];
        assert_eq!(staff_embed["role"], "doctor");
    }

    #[tokio::test]
    async fn test_dangling_reference_embeds_null() {
        let store = backend().await;
        let mut appointment = store
            .create(
                "appointments",
                json!({"patientId": "gone", "staffId": "also-gone", "date": "2026-03-15"}),
            )
            .await
            .unwrap();

        let schema = schema::by_path("appointments").unwrap();
        populate_one(&store, schema, &mut appointment).await.unwrap();

        assert!(appointment.content()["patient"].is_null());
        assert!(appointment.content()["staff"].is_null());
    }

    #[tokio::test]
    async fn test_missing_reference_field_is_left_alone() {
        let store = backend().await;
        let mut department = store
            .create("departments", json!({"name": "Cardiology"}))
            .await
            .unwrap();

        let schema = schema::by_path("departments").unwrap();
        populate_one(&store, schema, &mut department).await.unwrap();

        assert!(department.content().get("headStaff").is_none());
    }

    #[tokio::test]
    async fn test_batch_shares_lookups() {
        let store = backend().await;
        let dept = store
            .create("departments", json!({"name": "Oncology"}))
            .await
            .unwrap();
        let mut members = Vec::new();
        for name in ["A", "B", "C"] {
            members.push(
                store
                    .create(
                        "staff",
                        json!({
                            "firstName": name,
                            "lastName": "X",
                            "role": "nurse",
                            "departmentId": dept.id()
                        }),
                    )
                    .await
                    .unwrap(),
            );
        }

        let schema = schema::by_path("staff").unwrap();
        populate(&store, schema, &mut members).await.unwrap();

        for member in &members {
            assert_eq!(member.content()["department"]["name"], "Oncology");
        }
    }
}
