use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;

/// A document that can be stored in a [`Collection`].
///
/// Documents carry their own identity so that `put` can upsert without
/// a separate key argument.
pub trait Document: Clone + Send + Sync + 'static {
    /// Returns the unique identifier of this document.
    fn document_id(&self) -> Uuid;
}

/// Core trait for document collections.
///
/// A collection persists whole aggregate documents keyed by their id.
/// All implementations must be thread-safe (Send + Sync). Writes are
/// atomic at the single-document level: a failed `put` must leave the
/// previously stored document untouched.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    /// Retrieves a document by id, or `None` if it does not exist.
    async fn get(&self, id: Uuid) -> Result<Option<T>>;

    /// Inserts or replaces a document (last-write-wins).
    async fn put(&self, doc: T) -> Result<()>;

    /// Removes a document by id.
    ///
    /// Returns true if a document was removed, false if none existed.
    async fn remove(&self, id: Uuid) -> Result<bool>;

    /// Returns all documents in the collection.
    async fn list(&self) -> Result<Vec<T>>;
}
