//! Brand → Person → Date Hierarchy
//!
//! The photo metadata document: a typed tree of brands, persons and dates whose
//! leaves are ordered lists of asset records. Every level is keyed by a
//! normalized key (see [`keys::normalize_key`]) on both read and write.

pub mod document;
pub mod keys;
pub mod ops;

pub use document::{AssetRecord, BrandNode, Category, PersonNode, PhotoDocument};
pub use keys::{asset_file_name, asset_storage_key, extension_of, normalize_key, HierarchyPath};
pub use ops::{delete_asset, find_asset, insert_asset, rename_asset};
