//! Whole-document persistence of JSON metadata in the object store.
//!
//! Every mutation is load → mutate in memory → save the entire document.
//! There is no locking or versioning: concurrent writers race and the last
//! save wins.

use crate::error::StorageError;
use crate::objects::ObjectStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// Repository for one JSON document of type `D` stored under a fixed key.
pub struct DocumentStore<D> {
    objects: Arc<dyn ObjectStore>,
    key: String,
    _document: PhantomData<fn() -> D>,
}

impl<D> DocumentStore<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    pub fn new(objects: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        Self {
            objects,
            key: key.into(),
            _document: PhantomData,
        }
    }

    /// Load the document. A missing document is an empty one.
    pub fn load(&self) -> Result<D, StorageError> {
        let Some(bytes) = self.objects.get(&self.key)? else {
            tracing::debug!(key = %self.key, "Document not found, starting empty");
            return Ok(D::default());
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to parse document {}: {}", self.key, e);
            StorageError::Serialization(format!("{}: {}", self.key, e))
        })
    }

    /// Overwrite the stored document with `document`, pretty-printed.
    pub fn save(&self, document: &D) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(document)?;
        self.objects.put(&self.key, &body, "application/json")
    }
}
