//! Schema-driven validation of write requests.
//!
//! Handlers run these checks before touching the store:
//!
//! - the body is a JSON object
//! - required fields are present (create, replace)
//! - `status`, when given, is in the schema's value set
//! - reference fields, when given, point at existing records
//! - a uniquely-constrained field does not collide case-insensitively with
//!   another record
//! - deletes are blocked while dependent records still reference the target

use serde_json::{Map, Value};

use atrium_store::core::DocumentStore;
use atrium_store::error::ValidationError;
use atrium_store::query::Filter;
use atrium_store::schema::ResourceSchema;
use atrium_store::types::PageRequest;

use crate::error::RestResult;

fn require_object(body: &Value) -> RestResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ValidationError::NotAnObject.into())
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_required(schema: &ResourceSchema, obj: &Map<String, Value>) -> RestResult<()> {
    for field in schema.required_fields {
        if is_missing(obj.get(*field)) {
            return Err(ValidationError::MissingRequiredField {
                field: (*field).to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn check_status(schema: &ResourceSchema, obj: &Map<String, Value>) -> RestResult<()> {
    let Some(value) = obj.get("status") else {
        return Ok(());
    };
    if value.is_null() {
        return Ok(());
    }
    let status = value.as_str().unwrap_or_default();
    if !schema.allows_status(status) {
        return Err(ValidationError::InvalidStatus {
            collection: schema.collection.to_string(),
            value: status.to_string(),
            allowed: schema.status_values.join(", "),
        }
        .into());
    }
    Ok(())
}

async fn check_references<S>(
    store: &S,
    schema: &ResourceSchema,
    obj: &Map<String, Value>,
) -> RestResult<()>
where
    S: DocumentStore,
{
    for reference in schema.references {
        let Some(value) = obj.get(reference.field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let id = value.as_str().unwrap_or_default();
        if id.is_empty() || !store.exists(reference.target, id).await? {
            return Err(ValidationError::DanglingReference {
                field: reference.field.to_string(),
                target: reference.target.to_string(),
                id: id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Checks the schema's unique field against existing records, ignoring case.
/// `exclude` skips the record being updated so a no-op rename passes.
async fn check_unique<S>(
    store: &S,
    schema: &ResourceSchema,
    obj: &Map<String, Value>,
    exclude: Option<&str>,
) -> RestResult<()>
where
    S: DocumentStore,
{
    let Some(field) = schema.unique_field else {
        return Ok(());
    };
    let Some(value) = obj.get(field).and_then(Value::as_str) else {
        return Ok(());
    };

    let filter = Filter::empty().eq_fold(field, value);
    let page = store
        .find(schema.collection, &filter, &PageRequest::new(1, 2))
        .await?;

    let collides = page
        .items
        .iter()
        .any(|doc| Some(doc.id()) != exclude);
    if collides {
        return Err(ValidationError::DuplicateValue {
            collection: schema.collection.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates a create body: required fields, status, references, uniqueness.
pub async fn validate_create<S>(
    store: &S,
    schema: &ResourceSchema,
    body: &Value,
) -> RestResult<()>
where
    S: DocumentStore,
{
    let obj = require_object(body)?;
    check_required(schema, obj)?;
    check_status(schema, obj)?;
    check_references(store, schema, obj).await?;
    check_unique(store, schema, obj, None).await
}

/// Validates a replace body. Same checks as create, but the uniqueness scan
/// skips the record being replaced.
pub async fn validate_replace<S>(
    store: &S,
    schema: &ResourceSchema,
    id: &str,
    body: &Value,
) -> RestResult<()>
where
    S: DocumentStore,
{
    let obj = require_object(body)?;
    check_required(schema, obj)?;
    check_status(schema, obj)?;
    check_references(store, schema, obj).await?;
    check_unique(store, schema, obj, Some(id)).await
}

/// Validates a merge patch. Only the fields present in the patch are
/// checked; absent fields keep their stored values.
pub async fn validate_merge<S>(
    store: &S,
    schema: &ResourceSchema,
    id: &str,
    patch: &Value,
) -> RestResult<()>
where
    S: DocumentStore,
{
    let obj = require_object(patch)?;
    check_status(schema, obj)?;
    check_references(store, schema, obj).await?;
    check_unique(store, schema, obj, Some(id)).await
}

/// Rejects a delete while dependent records still reference the target.
pub async fn ensure_no_dependents<S>(
    store: &S,
    schema: &ResourceSchema,
    id: &str,
) -> RestResult<()>
where
    S: DocumentStore,
{
    for dependent in schema.dependents {
        let filter = Filter::empty().eq(dependent.field, id);
        let count = store.count(dependent.collection, &filter).await?;
        if count > 0 {
            return Err(ValidationError::HasDependents {
                collection: schema.collection.to_string(),
                id: id.to_string(),
                dependent: dependent.collection.to_string(),
                count,
            }
            .into());
        }
    }
    Ok(())
}
