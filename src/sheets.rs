//! Sheet links: spreadsheets attached to a brand/person/date.
//!
//! Entries are keyed by the raw `brand/person/date` string as entered, not by
//! normalized hierarchy keys, so a link only lines up with its gallery entry
//! when the same spelling is used for both.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Display name used when a link has none.
pub const DEFAULT_SHEET_NAME: &str = "Sales Data";

/// Fields of one sheet-link entry. Fields this crate does not know are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    #[serde(default, alias = "sheetName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SheetLink {
    /// Whether a sheet is attached; an entry without a sheet id is an empty shell.
    pub fn is_active(&self) -> bool {
        self.sheet_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Sheet-link document keyed by composite key.
pub type SheetDocument = BTreeMap<String, SheetLink>;

/// Active link with its composite key split back apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSheet {
    pub brand: String,
    pub person: String,
    pub date: String,
    pub sheet_id: String,
    pub display_name: String,
    pub embed_url: String,
}

/// Composite key `brand/person/date`, from raw input.
pub fn composite_key(brand: &str, person: &str, date: &str) -> String {
    format!("{}/{}/{}", brand, person, date)
}

/// Edit URL of a Google spreadsheet.
pub fn embed_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit", sheet_id)
}

/// Attach a sheet to `brand/person/date`, leaving other fields of the entry alone.
pub fn upsert(
    doc: &mut SheetDocument,
    brand: &str,
    person: &str,
    date: &str,
    sheet_id: &str,
    display_name: Option<&str>,
) {
    let entry = doc.entry(composite_key(brand, person, date)).or_default();
    let display_name = display_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_SHEET_NAME);

    entry.sheet_id = Some(sheet_id.to_string());
    entry.display_name = Some(display_name.to_string());
    entry.embed_url = Some(embed_url(sheet_id));
}

/// Detach the sheet. The entry itself stays, possibly as an empty shell.
pub fn remove(doc: &mut SheetDocument, brand: &str, person: &str, date: &str) {
    if let Some(entry) = doc.get_mut(&composite_key(brand, person, date)) {
        entry.sheet_id = None;
        entry.display_name = None;
        entry.embed_url = None;
    }
}

/// Entries with a sheet attached, in key order.
///
/// The key splits on its first two `/`; anything after belongs to the date.
pub fn list_active(doc: &SheetDocument) -> Vec<ActiveSheet> {
    doc.iter()
        .filter(|(_, link)| link.is_active())
        .map(|(key, link)| {
            let mut parts = key.splitn(3, '/');
            let mut next = || parts.next().unwrap_or_default().to_string();
            let (brand, person, date) = (next(), next(), next());
            let sheet_id = link.sheet_id.clone().unwrap_or_default();
            ActiveSheet {
                brand,
                person,
                date,
                display_name: link
                    .display_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
                embed_url: link.embed_url.clone().unwrap_or_else(|| embed_url(&sheet_id)),
                sheet_id,
            }
        })
        .collect()
}
