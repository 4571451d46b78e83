//! Purchase records with their invoice and product photos.

use crate::hierarchy::{extension_of, normalize_key};
use crate::types::ObjectKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One purchase. Photo lists keep upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub date: String,
    pub supplier: String,
    #[serde(default)]
    pub purchase_ids_text: String,
    #[serde(default)]
    pub invoice_photo_urls: Vec<String>,
    #[serde(default)]
    pub product_photo_urls: Vec<String>,
    #[serde(default)]
    pub total_text: String,
    #[serde(default)]
    pub return_info_text: String,
}

/// Purchase document keyed by purchase id.
pub type PurchaseDocument = BTreeMap<String, PurchaseRecord>;

/// Which photo list an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Invoice,
    Product,
}

impl PhotoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoKind::Invoice => "invoice",
            PhotoKind::Product => "product",
        }
    }
}

impl fmt::Display for PhotoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic purchase id `{date}-{supplier}-{timestamp}` over normalized parts.
pub fn purchase_id(date: &str, supplier: &str, timestamp_ms: i64) -> String {
    format!(
        "{}-{}-{}",
        normalize_key(date),
        normalize_key(supplier),
        timestamp_ms
    )
}

/// Object key `purchases/{id}-{kind}-{index}{ext}` of a purchase photo.
pub fn purchase_asset_key(
    purchase_id: &str,
    kind: PhotoKind,
    index: usize,
    original_name: &str,
) -> ObjectKey {
    format!(
        "purchases/{}-{}-{}{}",
        purchase_id,
        kind,
        index,
        extension_of(original_name)
    )
}

/// Whether `key` names a photo of purchase `purchase_id`.
pub fn is_purchase_asset_key(key: &str, purchase_id: &str) -> bool {
    key.strip_prefix("purchases/")
        .and_then(|name| name.strip_prefix(purchase_id))
        .is_some_and(|rest| rest.starts_with('-'))
}

pub fn insert(doc: &mut PurchaseDocument, record: PurchaseRecord) {
    doc.insert(record.id.clone(), record);
}

/// Remove a purchase; a missing id is a no-op.
pub fn remove(doc: &mut PurchaseDocument, id: &str) -> Option<PurchaseRecord> {
    doc.remove(id)
}

/// Purchases, newest date first, then by id.
pub fn list(doc: &PurchaseDocument) -> Vec<&PurchaseRecord> {
    let mut records: Vec<&PurchaseRecord> = doc.values().collect();
    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    records
}
