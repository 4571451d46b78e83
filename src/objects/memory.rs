use crate::error::StorageError;
use crate::objects::{join_public_url, strip_public_url, ObjectStore};
use crate::types::ObjectKey;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    content_type: String,
}

/// `HashMap`-backed object store for tests and embedding.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base: String,
}

impl InMemoryObjectStore {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base: public_base.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// Content type recorded for `key`, if stored.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.read().get(key).map(|o| o.content_type.clone())
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://objects")
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.objects.read().get(key).map(|o| o.body.clone()))
    }

    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                body: body.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_public_url(&self.public_base, key)
    }

    fn key_from_url(&self, url: &str) -> Option<ObjectKey> {
        strip_public_url(&self.public_base, url)
    }
}
