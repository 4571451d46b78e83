use crate::error::StorageError;
use crate::objects::{join_public_url, strip_public_url, ObjectStore};
use crate::types::ObjectKey;
use std::path::{Component, Path, PathBuf};

/// Object store backed by a local directory; each key maps to one file.
pub struct FsObjectStore {
    root: PathBuf,
    public_base: String,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path under the root, rejecting keys that could escape it.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let relative = Path::new(key);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(StorageError::InvalidKey(key.to_string())),
            }
        }
        if key.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FsObjectStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read object {}: {}", path.display(), e);
                Err(StorageError::IoError(e))
            }
        }
    }

    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Stage beside the target, then rename over it.
        let mut staging = path.clone().into_os_string();
        staging.push(".partial");
        let staging = PathBuf::from(staging);
        std::fs::write(&staging, body)?;
        std::fs::rename(&staging, &path)?;

        tracing::debug!(
            key,
            content_type,
            bytes = body.len(),
            "Stored object"
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn public_url(&self, key: &str) -> String {
        join_public_url(&self.public_base, key)
    }

    fn key_from_url(&self, url: &str) -> Option<ObjectKey> {
        strip_public_url(&self.public_base, url)
    }
}
