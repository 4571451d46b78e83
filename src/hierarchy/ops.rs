//! Pure mutations of the photo document.
//!
//! Callers load the document, apply one of these, then save it back.

use super::document::{AssetRecord, PhotoDocument};
use super::keys::{extension_of, HierarchyPath};

/// Append `record` under the normalized brand/person/date, creating missing levels.
///
/// Insertion order is kept and duplicates are allowed.
pub fn insert_asset(
    doc: &mut PhotoDocument,
    brand: &str,
    person: &str,
    date: &str,
    record: AssetRecord,
) {
    let path = HierarchyPath::new(brand, person, date);
    doc.leaf_entry(&path.brand, &path.person, &path.date)
        .push(record);
}

/// Look up an asset by exact name under a normalized path.
pub fn find_asset<'a>(
    doc: &'a PhotoDocument,
    brand: &str,
    person: &str,
    date: &str,
    name: &str,
) -> Option<&'a AssetRecord> {
    let path = HierarchyPath::new(brand, person, date);
    doc.leaf(&path.brand, &path.person, &path.date)?
        .iter()
        .find(|record| record.name == name)
}

/// Rename the first asset called `old_name`.
///
/// A `new_name` without any `.` inherits the old name's extension. Returns the
/// name given to the record; a missing path or record is a silent no-op (`None`).
pub fn rename_asset(
    doc: &mut PhotoDocument,
    brand: &str,
    person: &str,
    date: &str,
    old_name: &str,
    new_name: &str,
) -> Option<String> {
    let path = HierarchyPath::new(brand, person, date);
    let files = doc.leaf_mut(&path.brand, &path.person, &path.date)?;
    let record = files.iter_mut().find(|record| record.name == old_name)?;

    record.name = if new_name.contains('.') {
        new_name.to_string()
    } else {
        format!("{}{}", new_name, extension_of(&record.name))
    };
    Some(record.name.clone())
}

/// Remove the first asset called exactly `name` and return it.
///
/// The binary object is not touched; the caller deletes it with the returned
/// record's storage key.
pub fn delete_asset(
    doc: &mut PhotoDocument,
    brand: &str,
    person: &str,
    date: &str,
    name: &str,
) -> Option<AssetRecord> {
    let path = HierarchyPath::new(brand, person, date);
    let files = doc.leaf_mut(&path.brand, &path.person, &path.date)?;
    let index = files.iter().position(|record| record.name == name)?;
    Some(files.remove(index))
}
