use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    Result,
    collection::{Collection, Document},
};

/// In-memory collection implementation.
///
/// Stores all documents in a map behind an async read-write lock and
/// provides the same interface as an external document database.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> InMemoryCollection<T> {
    /// Creates a new empty in-memory collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents stored.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Returns true if the collection holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    /// Clears all documents.
    pub async fn clear(&self) {
        self.docs.write().await.clear();
    }
}

#[async_trait]
impl<T: Document> Collection<T> for InMemoryCollection<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        let docs = self.docs.read().await;
        Ok(docs.get(&id).cloned())
    }

    async fn put(&self, doc: T) -> Result<()> {
        let mut docs = self.docs.write().await;
        docs.insert(doc.document_id(), doc);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut docs = self.docs.write().await;
        Ok(docs.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let docs = self.docs.read().await;
        Ok(docs.values().cloned().collect())
    }
}
