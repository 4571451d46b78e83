use crate::error::StorageError;
use crate::types::ObjectKey;

/// Key/value object store holding image binaries and JSON documents.
///
/// Keys are `/`-separated relative paths such as `photos/Acme/J-Smith/2024-01-01/1700_a.jpg`.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object. A missing key is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store an object, replacing any previous value under `key`.
    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Remove an object. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL an asset stored under `key` is served from.
    fn public_url(&self, key: &str) -> String;

    /// Key behind a URL produced by [`ObjectStore::public_url`], if it is one.
    fn key_from_url(&self, url: &str) -> Option<ObjectKey>;
}

/// Join the public storage root and an object key with exactly one `/`.
pub fn join_public_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

/// Inverse of [`join_public_url`]: the key of `url` under `base`.
pub fn strip_public_url(base: &str, url: &str) -> Option<ObjectKey> {
    url.strip_prefix(base.trim_end_matches('/'))?
        .strip_prefix('/')
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// Guess a content type from a file name's extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
