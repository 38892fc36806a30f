//! Stored document types.
//!
//! This module defines the [`StoredDocument`] type, which wraps an entity
//! record with store metadata: collection, id, and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entity record with store metadata.
///
/// `StoredDocument` wraps a flat JSON document along with the metadata the
/// store maintains for it:
///
/// - **Identity**: collection name and store-assigned id
/// - **Timestamps**: creation and last-modification times
///
/// The `id`, `createdAt`, and `updatedAt` fields are mirrored into the
/// content so that serialized responses carry them without a separate
/// wrapping step.
///
/// # Examples
///
/// ```
/// use atrium_store::types::StoredDocument;
/// use serde_json::json;
///
/// let doc = StoredDocument::new(
///     "patients",
///     "p-1",
///     json!({"firstName": "Ada", "lastName": "Osei"}),
/// );
///
/// assert_eq!(doc.collection(), "patients");
/// assert_eq!(doc.id(), "p-1");
/// assert_eq!(doc.content()["id"], "p-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The collection this document belongs to.
    collection: String,

    /// The document's store-assigned id.
    id: String,

    /// The document content as JSON.
    content: Value,

    /// When the document was created.
    created_at: DateTime<Utc>,

    /// When the document was last modified.
    updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Creates a new document with current timestamps.
    pub fn new(collection: impl Into<String>, id: impl Into<String>, content: Value) -> Self {
        let now = Utc::now();
        Self::from_storage(collection, id, content, now, now)
    }

    /// Reconstructs a document from storage with explicit timestamps.
    pub fn from_storage(
        collection: impl Into<String>,
        id: impl Into<String>,
        mut content: Value,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        if let Some(obj) = content.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.clone()));
            obj.insert(
                "createdAt".to_string(),
                Value::String(created_at.to_rfc3339()),
            );
            obj.insert(
                "updatedAt".to_string(),
                Value::String(updated_at.to_rfc3339()),
            );
        }
        Self {
            collection: collection.into(),
            id,
            content,
            created_at,
            updated_at,
        }
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the document id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the document content.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns a mutable reference to the document content.
    pub fn content_mut(&mut self) -> &mut Value {
        &mut self.content
    }

    /// Consumes the document and returns its content.
    pub fn into_content(self) -> Value {
        self.content
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a string field from the content, if present.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.content.get(field).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_injects_metadata() {
        let doc = StoredDocument::new("patients", "p-1", json!({"firstName": "Ada"}));
        assert_eq!(doc.content()["id"], "p-1");
        assert!(doc.content()["createdAt"].is_string());
        assert!(doc.content()["updatedAt"].is_string());
    }

    #[test]
    fn test_get_str() {
        let doc = StoredDocument::new("staff", "s-1", json!({"role": "doctor"}));
        assert_eq!(doc.get_str("role"), Some("doctor"));
        assert_eq!(doc.get_str("missing"), None);
    }

    #[test]
    fn test_from_storage_preserves_timestamps() {
        let created = "2026-01-02T03:04:05Z".parse().unwrap();
        let updated = "2026-01-03T03:04:05Z".parse().unwrap();
        let doc =
            StoredDocument::from_storage("rooms", "r-1", json!({"number": "101"}), created, updated);
        assert_eq!(doc.created_at(), created);
        assert_eq!(doc.updated_at(), updated);
    }
}
