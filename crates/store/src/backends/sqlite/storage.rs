//! DocumentStore implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params_from_iter;
use serde_json::Value;
use tracing::debug;

use crate::core::DocumentStore;
use crate::error::{ResourceError, StoreResult, ValidationError};
use crate::query::Filter;
use crate::types::{Page, PageMeta, PageRequest, StoredDocument};

use super::SqliteBackend;
use super::sql::{json_field, render_filter};

/// Fields the store owns; stripped from incoming content before writing.
const META_FIELDS: &[&str] = &["createdAt", "updatedAt"];

fn strip_meta(content: &mut Value) {
    if let Some(obj) = content.as_object_mut() {
        for field in META_FIELDS {
            obj.remove(*field);
        }
    }
}

fn parse_timestamp(backend: &SqliteBackend, raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| backend.internal(format!("failed to parse timestamp '{}': {}", raw, e)))
}

impl SqliteBackend {
    fn decode_row(
        &self,
        collection: &str,
        id: &str,
        data: &str,
        created_at: &str,
        updated_at: &str,
    ) -> StoreResult<StoredDocument> {
        let content: Value = serde_json::from_str(data)
            .map_err(|e| self.internal(format!("failed to deserialize document: {}", e)))?;
        Ok(StoredDocument::from_storage(
            collection,
            id,
            content,
            parse_timestamp(self, created_at)?,
            parse_timestamp(self, updated_at)?,
        ))
    }
}

#[async_trait]
impl DocumentStore for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(&self, collection: &str, content: Value) -> StoreResult<StoredDocument> {
        if !content.is_object() {
            return Err(ValidationError::NotAnObject.into());
        }

        let conn = self.get_connection()?;

        // Honor a caller-supplied id, otherwise assign one.
        let id = content
            .get("id")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id.as_str()],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if exists {
            return Err(ResourceError::AlreadyExists {
                collection: collection.to_string(),
                id,
            }
            .into());
        }

        let mut content = content;
        strip_meta(&mut content);
        if let Some(obj) = content.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.clone()));
        }

        let data = serde_json::to_string(&content)
            .map_err(|e| self.internal(format!("failed to serialize document: {}", e)))?;
        let now = Utc::now();
        let stamp = now.to_rfc3339();

        conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            [collection, id.as_str(), data.as_str(), stamp.as_str(), stamp.as_str()],
        )
        .map_err(|e| self.internal(format!("failed to insert document: {}", e)))?;

        debug!(collection = %collection, id = %id, "created document");
        Ok(StoredDocument::from_storage(collection, id, content, now, now))
    }

    async fn read(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let conn = self.get_connection()?;

        let result = conn.query_row(
            "SELECT data, created_at, updated_at FROM documents
             WHERE collection = ?1 AND id = ?2",
            [collection, id],
            |row| {
                let data: String = row.get(0)?;
                let created_at: String = row.get(1)?;
                let updated_at: String = row.get(2)?;
                Ok((data, created_at, updated_at))
            },
        );

        match result {
            Ok((data, created_at, updated_at)) => Ok(Some(self.decode_row(
                collection,
                id,
                &data,
                &created_at,
                &updated_at,
            )?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(self.internal(format!("failed to read document: {}", e))),
        }
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        content: Value,
    ) -> StoreResult<StoredDocument> {
        if !content.is_object() {
            return Err(ValidationError::NotAnObject.into());
        }

        let conn = self.get_connection()?;

        let created_at: String = conn
            .query_row(
                "SELECT created_at FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => ResourceError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                }
                .into(),
                e => self.internal(format!("failed to read document: {}", e)),
            })?;

        let mut content = content;
        strip_meta(&mut content);
        if let Some(obj) = content.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.to_string()));
        }

        let data = serde_json::to_string(&content)
            .map_err(|e| self.internal(format!("failed to serialize document: {}", e)))?;
        let now = Utc::now();

        conn.execute(
            "UPDATE documents SET data = ?3, updated_at = ?4
             WHERE collection = ?1 AND id = ?2",
            [collection, id, data.as_str(), now.to_rfc3339().as_str()],
        )
        .map_err(|e| self.internal(format!("failed to update document: {}", e)))?;

        Ok(StoredDocument::from_storage(
            collection,
            id,
            content,
            parse_timestamp(self, &created_at)?,
            now,
        ))
    }

    async fn merge(&self, collection: &str, id: &str, patch: Value) -> StoreResult<StoredDocument> {
        let Some(patch_obj) = patch.as_object() else {
            return Err(ValidationError::NotAnObject.into());
        };

        let current = self.read(collection, id).await?.ok_or_else(|| {
            crate::error::StoreError::from(ResourceError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
        })?;

        let mut merged = current.into_content();
        if let Some(obj) = merged.as_object_mut() {
            for (key, value) in patch_obj {
                if key == "id" || META_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                if value.is_null() {
                    obj.remove(key);
                } else {
                    obj.insert(key.clone(), value.clone());
                }
            }
        }

        self.replace(collection, id, merged).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let conn = self.get_connection()?;

        let affected = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
            )
            .map_err(|e| self.internal(format!("failed to delete document: {}", e)))?;

        if affected == 0 {
            return Err(ResourceError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        debug!(collection = %collection, id = %id, "deleted document");
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        page: &PageRequest,
    ) -> StoreResult<Page<StoredDocument>> {
        let total = self.count(collection, filter).await?;
        let meta = PageMeta::new(page, total);

        let conn = self.get_connection()?;
        let fragment = render_filter(filter, 2);

        let mut sql = String::from(
            "SELECT id, data, created_at, updated_at FROM documents WHERE collection = ?1",
        );
        if !fragment.is_empty() {
            sql.push_str(" AND ");
            sql.push_str(&fragment.sql);
        }
        sql.push_str(&format!(
            " ORDER BY created_at DESC, id ASC LIMIT {} OFFSET {}",
            page.limit(),
            page.skip()
        ));

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| self.internal(format!("failed to prepare query: {}", e)))?;

        let mut bindings: Vec<String> = Vec::with_capacity(1 + fragment.params.len());
        bindings.push(collection.to_string());
        bindings.extend(fragment.params);

        let rows = stmt
            .query_map(params_from_iter(bindings.iter()), |row| {
                let id: String = row.get(0)?;
                let data: String = row.get(1)?;
                let created_at: String = row.get(2)?;
                let updated_at: String = row.get(3)?;
                Ok((id, data, created_at, updated_at))
            })
            .map_err(|e| self.internal(format!("failed to run query: {}", e)))?;

        let mut items = Vec::new();
        for row in rows {
            let (id, data, created_at, updated_at) =
                row.map_err(|e| self.internal(format!("failed to read row: {}", e)))?;
            items.push(self.decode_row(collection, &id, &data, &created_at, &updated_at)?);
        }

        Ok(Page::new(items, meta))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let conn = self.get_connection()?;
        let fragment = render_filter(filter, 2);

        let mut sql = String::from("SELECT COUNT(*) FROM documents WHERE collection = ?1");
        if !fragment.is_empty() {
            sql.push_str(" AND ");
            sql.push_str(&fragment.sql);
        }

        let mut bindings: Vec<String> = Vec::with_capacity(1 + fragment.params.len());
        bindings.push(collection.to_string());
        bindings.extend(fragment.params);

        let count: i64 = conn
            .query_row(&sql, params_from_iter(bindings.iter()), |row| row.get(0))
            .map_err(|e| self.internal(format!("failed to count documents: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn group_count(
        &self,
        collection: &str,
        field: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<(String, u64)>> {
        let conn = self.get_connection()?;
        let path = json_field(field);

        let mut sql = format!(
            "SELECT CAST({} AS TEXT) AS group_key, COUNT(*) AS n
             FROM documents
             WHERE collection = ?1 AND {} IS NOT NULL
             GROUP BY group_key
             ORDER BY n DESC, group_key ASC",
            path, path
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| self.internal(format!("failed to prepare aggregation: {}", e)))?;

        let rows = stmt
            .query_map([collection], |row| {
                let key: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((key, count.max(0) as u64))
            })
            .map_err(|e| self.internal(format!("failed to run aggregation: {}", e)))?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row.map_err(|e| self.internal(format!("failed to read group: {}", e)))?);
        }
        Ok(groups)
    }

    async fn read_batch(
        &self,
        collection: &str,
        ids: &[&str],
    ) -> StoreResult<Vec<StoredDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_connection()?;

        let placeholders: Vec<String> = (2..ids.len() + 2).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "SELECT id, data, created_at, updated_at FROM documents
             WHERE collection = ?1 AND id IN ({})",
            placeholders.join(", ")
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| self.internal(format!("failed to prepare batch read: {}", e)))?;

        let mut bindings: Vec<&str> = Vec::with_capacity(1 + ids.len());
        bindings.push(collection);
        bindings.extend_from_slice(ids);

        let rows = stmt
            .query_map(params_from_iter(bindings.iter()), |row| {
                let id: String = row.get(0)?;
                let data: String = row.get(1)?;
                let created_at: String = row.get(2)?;
                let updated_at: String = row.get(3)?;
                Ok((id, data, created_at, updated_at))
            })
            .map_err(|e| self.internal(format!("failed to run batch read: {}", e)))?;

        let mut items = Vec::with_capacity(ids.len());
        for row in rows {
            let (id, data, created_at, updated_at) =
                row.map_err(|e| self.internal(format!("failed to read row: {}", e)))?;
            items.push(self.decode_row(collection, &id, &data, &created_at, &updated_at)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = backend().await;
        let doc = store
            .create("patients", json!({"firstName": "Ada"}))
            .await
            .unwrap();
        assert!(!doc.id().is_empty());
        assert_eq!(doc.content()["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_create_honors_supplied_id() {
        let store = backend().await;
        let doc = store
            .create("patients", json!({"id": "p-1", "firstName": "Ada"}))
            .await
            .unwrap();
        assert_eq!(doc.id(), "p-1");
    }

    #[tokio::test]
    async fn test_create_duplicate_id_rejected() {
        let store = backend().await;
        store
            .create("patients", json!({"id": "p-1", "firstName": "Ada"}))
            .await
            .unwrap();
        let err = store
            .create("patients", json!({"id": "p-1", "firstName": "Eve"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Resource(ResourceError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_non_object() {
        let store = backend().await;
        let err = store.create("patients", json!([1, 2])).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Validation(ValidationError::NotAnObject)
        ));
    }

    #[tokio::test]
    async fn test_read_round_trip() {
        let store = backend().await;
        let doc = store
            .create("rooms", json!({"number": "101", "capacity": 4}))
            .await
            .unwrap();
        let read = store.read("rooms", doc.id()).await.unwrap().unwrap();
        assert_eq!(read.content()["number"], "101");
        assert_eq!(read.content()["capacity"], 4);
    }

    #[tokio::test]
    async fn test_read_missing_returns_none() {
        let store = backend().await;
        assert!(store.read("rooms", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_keeps_created_at() {
        let store = backend().await;
        let doc = store
            .create("rooms", json!({"number": "101"}))
            .await
            .unwrap();
        let replaced = store
            .replace("rooms", doc.id(), json!({"number": "102"}))
            .await
            .unwrap();
        assert_eq!(replaced.content()["number"], "102");
        assert_eq!(replaced.created_at(), doc.created_at());
        assert!(replaced.content().get("capacity").is_none());
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let store = backend().await;
        let err = store
            .replace("rooms", "nope", json!({"number": "1"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Resource(ResourceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_merge_patches_top_level_fields() {
        let store = backend().await;
        let doc = store
            .create(
                "shifts",
                json!({"staffId": "s-1", "status": "scheduled", "date": "2026-03-15"}),
            )
            .await
            .unwrap();
        let merged = store
            .merge("shifts", doc.id(), json!({"status": "completed"}))
            .await
            .unwrap();
        assert_eq!(merged.content()["status"], "completed");
        assert_eq!(merged.content()["staffId"], "s-1");
        assert_eq!(merged.content()["date"], "2026-03-15");
    }

    #[tokio::test]
    async fn test_merge_null_removes_field() {
        let store = backend().await;
        let doc = store
            .create("shifts", json!({"staffId": "s-1", "notes": "x"}))
            .await
            .unwrap();
        let merged = store
            .merge("shifts", doc.id(), json!({"notes": null}))
            .await
            .unwrap();
        assert!(merged.content().get("notes").is_none());
    }

    #[tokio::test]
    async fn test_merge_cannot_change_id() {
        let store = backend().await;
        let doc = store
            .create("shifts", json!({"staffId": "s-1"}))
            .await
            .unwrap();
        let merged = store
            .merge("shifts", doc.id(), json!({"id": "other"}))
            .await
            .unwrap();
        assert_eq!(merged.id(), doc.id());
    }

    #[tokio::test]
    async fn test_delete_then_read() {
        let store = backend().await;
        let doc = store
            .create("rooms", json!({"number": "101"}))
            .await
            .unwrap();
        store.delete("rooms", doc.id()).await.unwrap();
        assert!(store.read("rooms", doc.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = backend().await;
        let err = store.delete("rooms", "nope").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Resource(ResourceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_paginates() {
        let store = backend().await;
        for i in 0..12 {
            store
                .create("departments", json!({"name": format!("Dept {}", i)}))
                .await
                .unwrap();
        }

        let page = store
            .find(
                "departments",
                &Filter::empty(),
                &PageRequest::new(2, 5),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page.meta.total, 12);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_find_past_end_returns_empty_with_meta() {
        let store = backend().await;
        for i in 0..3 {
            store
                .create("departments", json!({"name": format!("Dept {}", i)}))
                .await
                .unwrap();
        }

        let page = store
            .find(
                "departments",
                &Filter::empty(),
                &PageRequest::new(9, 10),
            )
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.total_pages, 1);
    }

    #[tokio::test]
    async fn test_find_filters_by_status() {
        let store = backend().await;
        for status in ["scheduled", "scheduled", "completed"] {
            store
                .create("appointments", json!({"status": status}))
                .await
                .unwrap();
        }

        let filter = Filter::empty().eq("status", "scheduled");
        let page = store
            .find("appointments", &filter, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);
        assert!(page.items.iter().all(|d| d.get_str("status") == Some("scheduled")));
    }

    #[tokio::test]
    async fn test_find_search_is_case_insensitive() {
        let store = backend().await;
        store
            .create("patients", json!({"firstName": "Amara", "lastName": "Okafor"}))
            .await
            .unwrap();
        store
            .create("patients", json!({"firstName": "Ben", "lastName": "Smith"}))
            .await
            .unwrap();

        let filter = Filter::empty().contains(&["firstName", "lastName"], "OKAF");
        let page = store
            .find("patients", &filter, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.items[0].get_str("firstName"), Some("Amara"));
    }

    #[tokio::test]
    async fn test_find_day_range() {
        let store = backend().await;
        for date in ["2026-03-14", "2026-03-15", "2026-03-16"] {
            store
                .create("appointments", json!({"date": date}))
                .await
                .unwrap();
        }

        let filter = Filter::empty().on_day("date", "2026-03-15".parse().unwrap());
        let page = store
            .find("appointments", &filter, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.items[0].get_str("date"), Some("2026-03-15"));
    }

    #[tokio::test]
    async fn test_day_range_covers_datetimes() {
        let store = backend().await;
        store
            .create("appointments", json!({"date": "2026-03-15T14:30:00Z"}))
            .await
            .unwrap();

        let filter = Filter::empty().on_day("date", "2026-03-15".parse().unwrap());
        let count = store.count("appointments", &filter).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_eq_fold() {
        let store = backend().await;
        store
            .create("departments", json!({"name": "Cardiology"}))
            .await
            .unwrap();

        let filter = Filter::empty().eq_fold("name", "cardiology");
        assert_eq!(store.count("departments", &filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = backend().await;
        store
            .create("patients", json!({"firstName": "Ada"}))
            .await
            .unwrap();
        assert_eq!(store.count("staff", &Filter::empty()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_group_count_orders_descending() {
        let store = backend().await;
        for dept in ["d1", "d1", "d1", "d2", "d2", "d3"] {
            store
                .create("staff", json!({"departmentId": dept, "firstName": "X"}))
                .await
                .unwrap();
        }
        // A record with no department is skipped.
        store
            .create("staff", json!({"firstName": "Y"}))
            .await
            .unwrap();

        let groups = store.group_count("staff", "departmentId", None).await.unwrap();
        assert_eq!(
            groups,
            vec![
                ("d1".to_string(), 3),
                ("d2".to_string(), 2),
                ("d3".to_string(), 1)
            ]
        );

        let top = store
            .group_count("staff", "departmentId", Some(2))
            .await
            .unwrap();
        assert_eq!(top.len(), 2);
    }

    #[tokio::test]
    async fn test_read_batch_omits_missing() {
        let store = backend().await;
        let a = store
            .create("staff", json!({"firstName": "A"}))
            .await
            .unwrap();
        let b = store
            .create("staff", json!({"firstName": "B"}))
            .await
            .unwrap();

        let docs = store
            .read_batch("staff", &[a.id(), "missing", b.id()])
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_read_batch_resolves_every_id() {
        let store = backend().await;
        let mut created = Vec::new();
        for i in 0..20 {
            created.push(
                store
                    .create("patients", json!({"firstName": format!("P{}", i)}))
                    .await
                    .unwrap(),
            );
        }
        // Same ids in another collection must not leak into the batch.
        store
            .create("staff", json!({"id": created[0].id(), "firstName": "S"}))
            .await
            .unwrap();

        let ids: Vec<&str> = created.iter().map(|doc| doc.id()).collect();
        let docs = store.read_batch("patients", &ids).await.unwrap();
        assert_eq!(docs.len(), 20);
        for doc in &docs {
            assert_eq!(doc.collection(), "patients");
        }

        let empty = store.read_batch("patients", &[]).await.unwrap();
        assert!(empty.is_empty());
    }
}
