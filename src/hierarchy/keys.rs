//! Key normalization and storage key derivation.

use crate::types::ObjectKey;

/// Separator replacing whitespace runs inside hierarchy keys.
pub const KEY_SEPARATOR: &str = "-";

/// Normalize a raw brand, person or date into a hierarchy key.
///
/// Trims the input and replaces each internal whitespace run with a single
/// `-`. Normalizing a normalized key returns it unchanged.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(KEY_SEPARATOR)
}

/// Normalized brand/person/date triple addressing one leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HierarchyPath {
    pub brand: String,
    pub person: String,
    pub date: String,
}

impl HierarchyPath {
    /// Build a path from raw input, normalizing each level.
    pub fn new(brand: &str, person: &str, date: &str) -> Self {
        Self {
            brand: normalize_key(brand),
            person: normalize_key(person),
            date: normalize_key(date),
        }
    }
}

impl std::fmt::Display for HierarchyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.brand, self.person, self.date)
    }
}

/// Stored file name of an uploaded asset: `{timestamp}_{originalName}`.
///
/// Any directory part of `original_name` is dropped.
pub fn asset_file_name(timestamp_ms: i64, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    format!("{}_{}", timestamp_ms, base)
}

/// Object key of a hierarchy asset: `photos/{brand}/{person}/{date}/{fileName}`.
pub fn asset_storage_key(path: &HierarchyPath, file_name: &str) -> ObjectKey {
    format!(
        "photos/{}/{}/{}/{}",
        path.brand, path.person, path.date, file_name
    )
}

/// Extension of a file name including the leading dot, or `""`.
///
/// A leading dot alone (`.hidden`) does not count as an extension.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}
