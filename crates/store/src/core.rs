//! Core document store trait.
//!
//! [`DocumentStore`] defines the CRUD and query operations every backend
//! implements. Updates are last-writer-wins: there are no version tokens and
//! no transactions spanning multiple writes. Each API request performs one
//! or two independent store operations (a count plus a find, or a fetch
//! followed by populate reads).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::query::Filter;
use crate::types::{Page, PageRequest, StoredDocument};

/// Storage operations over JSON document collections.
///
/// # Example
///
/// ```ignore
/// use atrium_store::core::DocumentStore;
/// use atrium_store::query::Filter;
/// use atrium_store::types::PageRequest;
///
/// async fn example<S: DocumentStore>(store: &S) -> atrium_store::error::StoreResult<()> {
///     let doc = store
///         .create("patients", serde_json::json!({"firstName": "Ada"}))
///         .await?;
///
///     let page = store
///         .find("patients", &Filter::empty(), &PageRequest::default())
///         .await?;
///     assert_eq!(page.meta.total, 1);
///
///     store.delete("patients", doc.id()).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a new document, assigning an id if the body has none.
    ///
    /// # Errors
    ///
    /// * `ResourceError::AlreadyExists` if the body carries an id that is
    ///   already taken.
    /// * `ValidationError::NotAnObject` if the body is not a JSON object.
    async fn create(&self, collection: &str, content: Value) -> StoreResult<StoredDocument>;

    /// Reads a document by id. Returns `None` if it does not exist.
    async fn read(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Replaces a document's content wholesale, refreshing `updatedAt`.
    ///
    /// # Errors
    ///
    /// * `ResourceError::NotFound` if the document does not exist.
    async fn replace(&self, collection: &str, id: &str, content: Value)
    -> StoreResult<StoredDocument>;

    /// Merges top-level fields of `patch` into an existing document.
    ///
    /// `id`, `createdAt`, and `updatedAt` in the patch are ignored; the
    /// store owns them.
    async fn merge(&self, collection: &str, id: &str, patch: Value) -> StoreResult<StoredDocument>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// * `ResourceError::NotFound` if the document does not exist.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Returns one page of documents matching the filter, newest first,
    /// along with pagination metadata computed from a count query.
    ///
    /// A page past the end of the result set returns empty items with the
    /// metadata still populated.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        page: &PageRequest,
    ) -> StoreResult<Page<StoredDocument>>;

    /// Counts documents matching the filter.
    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Groups documents by a field value and counts per group, descending.
    ///
    /// Documents missing the field are skipped. `limit` truncates to the
    /// top N groups; `None` returns all groups.
    async fn group_count(
        &self,
        collection: &str,
        field: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<(String, u64)>>;

    /// Checks whether a document exists.
    async fn exists(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self.read(collection, id).await?.is_some())
    }

    /// Reads multiple documents by id, omitting ids that do not resolve.
    async fn read_batch(
        &self,
        collection: &str,
        ids: &[&str],
    ) -> StoreResult<Vec<StoredDocument>> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(doc) = self.read(collection, id).await? {
                results.push(doc);
            }
        }
        Ok(results)
    }
}
