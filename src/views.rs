//! Gallery Views
//!
//! Read-only, filtered projections of the photo document. A projection walks
//! brand → person → date, keeps the assets a predicate accepts, and drops every
//! date, person and brand left empty. Brands on an exclusion list are skipped.

use crate::hierarchy::{normalize_key, AssetRecord, Category, PhotoDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Assets of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateView {
    pub date: String,
    pub files: Vec<AssetRecord>,
}

/// Dates of one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub person: String,
    pub dates: Vec<DateView>,
}

/// Persons of one brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandView {
    pub brand: String,
    pub persons: Vec<PersonView>,
}

/// Predicate catalogue behind the gallery pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFilter {
    /// Assets tagged `main` or untagged
    Main,
    Other,
    Other2,
    Sales,
    /// No filtering (admin full view)
    All,
}

impl AssetFilter {
    pub const CATALOGUE: [AssetFilter; 5] = [
        AssetFilter::Main,
        AssetFilter::Other,
        AssetFilter::Other2,
        AssetFilter::Sales,
        AssetFilter::All,
    ];

    pub fn matches(&self, record: &AssetRecord) -> bool {
        let category = record.effective_category();
        match self {
            AssetFilter::Main => category == Category::Main,
            AssetFilter::Other => category == Category::Other,
            AssetFilter::Other2 => category == Category::Other2,
            AssetFilter::Sales => category == Category::Sales,
            AssetFilter::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFilter::Main => "main",
            AssetFilter::Other => "other",
            AssetFilter::Other2 => "other2",
            AssetFilter::Sales => "sales",
            AssetFilter::All => "all",
        }
    }
}

impl fmt::Display for AssetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetFilter::CATALOGUE
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid view: {} (must be one of main, other, other2, sales, all)",
                    s
                )
            })
    }
}

/// Project `doc` through `predicate`, pruning empty branches and skipping
/// `excluded_brands` (compared after normalization).
pub fn project<F>(doc: &PhotoDocument, predicate: F, excluded_brands: &[String]) -> Vec<BrandView>
where
    F: Fn(&AssetRecord) -> bool,
{
    let excluded: HashSet<String> = excluded_brands.iter().map(|b| normalize_key(b)).collect();

    doc.brands
        .iter()
        .filter(|(brand, _)| !excluded.contains(brand.as_str()))
        .filter_map(|(brand, brand_node)| {
            let persons: Vec<PersonView> = brand_node
                .persons
                .iter()
                .filter_map(|(person, person_node)| {
                    let dates: Vec<DateView> = person_node
                        .dates
                        .iter()
                        .filter_map(|(date, files)| {
                            let files: Vec<AssetRecord> =
                                files.iter().filter(|f| predicate(f)).cloned().collect();
                            non_empty(files).map(|files| DateView {
                                date: date.clone(),
                                files,
                            })
                        })
                        .collect();
                    non_empty(dates).map(|dates| PersonView {
                        person: person.clone(),
                        dates,
                    })
                })
                .collect();
            non_empty(persons).map(|persons| BrandView {
                brand: brand.clone(),
                persons,
            })
        })
        .collect()
}

/// Project with one of the catalogue filters.
pub fn project_filter(
    doc: &PhotoDocument,
    filter: AssetFilter,
    excluded_brands: &[String],
) -> Vec<BrandView> {
    project(doc, |record| filter.matches(record), excluded_brands)
}

/// Number of files in a projection.
pub fn file_count(view: &[BrandView]) -> usize {
    view.iter()
        .flat_map(|b| &b.persons)
        .flat_map(|p| &p.dates)
        .map(|d| d.files.len())
        .sum()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
