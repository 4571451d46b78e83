//! Typed photo metadata document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gallery category an asset is tagged with.
///
/// Unknown category names are kept verbatim so documents round-trip; a blank
/// name reads as `main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Main,
    Other,
    Other2,
    Sales,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Main => "main",
            Category::Other => "other",
            Category::Other2 => "other2",
            Category::Sales => "sales",
            Category::Custom(name) => name,
        }
    }

    /// Category requested for an upload: known non-main names are honoured,
    /// anything else (including nothing) tags the asset `main`.
    pub fn for_upload(requested: Option<&str>) -> Self {
        match requested.map(str::trim) {
            Some("other") => Category::Other,
            Some("other2") => Category::Other2,
            Some("sales") => Category::Sales,
            _ => Category::Main,
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match name.as_str() {
            "" | "main" => Category::Main,
            "other" => Category::Other,
            "other2" => Category::Other2,
            "sales" => Category::Sales,
            _ => Category::Custom(name),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Display name, initially `{timestamp}_{originalName}`.
    pub name: String,
    /// Public URL the asset is served from.
    pub url: String,
    /// Object key of the binary.
    #[serde(alias = "s3Key")]
    pub storage_key: String,
    /// Absent on records written before categories existed.
    #[serde(default, alias = "galleryType", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl AssetRecord {
    /// Category with the back-compat default applied: untagged means `main`.
    pub fn effective_category(&self) -> Category {
        self.category.clone().unwrap_or(Category::Main)
    }
}

/// Persons of one brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandNode {
    pub persons: BTreeMap<String, PersonNode>,
}

/// Dates of one person, each holding its assets in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonNode {
    pub dates: BTreeMap<String, Vec<AssetRecord>>,
}

/// Root of the photo metadata document, keyed by brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoDocument {
    pub brands: BTreeMap<String, BrandNode>,
}

impl PhotoDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Assets stored under already-normalized keys.
    pub fn leaf(&self, brand: &str, person: &str, date: &str) -> Option<&Vec<AssetRecord>> {
        self.brands
            .get(brand)?
            .persons
            .get(person)?
            .dates
            .get(date)
    }

    pub fn leaf_mut(
        &mut self,
        brand: &str,
        person: &str,
        date: &str,
    ) -> Option<&mut Vec<AssetRecord>> {
        self.brands
            .get_mut(brand)?
            .persons
            .get_mut(person)?
            .dates
            .get_mut(date)
    }

    /// Leaf under normalized keys, creating missing levels.
    pub fn leaf_entry(&mut self, brand: &str, person: &str, date: &str) -> &mut Vec<AssetRecord> {
        self.brands
            .entry(brand.to_string())
            .or_default()
            .persons
            .entry(person.to_string())
            .or_default()
            .dates
            .entry(date.to_string())
            .or_default()
    }

    /// Total number of asset records.
    pub fn asset_count(&self) -> usize {
        self.brands
            .values()
            .flat_map(|b| b.persons.values())
            .flat_map(|p| p.dates.values())
            .map(Vec::len)
            .sum()
    }
}
