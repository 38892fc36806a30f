//! Field-name normalization at the API boundary.
//!
//! Canonical field names are camelCase (`firstName`, `departmentId`), but
//! clients historically sent snake_case for several of them. Request bodies
//! are normalized on the way in: any top-level key the schema declares as an
//! alias is renamed to its canonical form. Responses always use canonical
//! names.

use serde_json::{Map, Value};

use atrium_store::schema::ResourceSchema;

/// Renames aliased top-level keys in a request body to their canonical form.
///
/// When both an alias and its canonical key are present, the canonical key
/// wins and the alias is dropped. Non-object bodies pass through untouched;
/// the validators reject them later.
pub fn normalize_body(schema: &ResourceSchema, body: Value) -> Value {
    let Value::Object(fields) = body else {
        return body;
    };

    let mut normalized = Map::with_capacity(fields.len());

    // Canonical keys first so an alias never shadows one.
    for (key, value) in &fields {
        if schema.canonical_field(key) == key.as_str() {
            normalized.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in fields {
        let canonical = schema.canonical_field(&key);
        if canonical != key.as_str() && !normalized.contains_key(canonical) {
            normalized.insert(canonical.to_string(), value);
        }
    }

    Value::Object(normalized)
}
