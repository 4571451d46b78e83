//! Core types for the photo portal.

/// ObjectKey: opaque key of an object in the object store
pub type ObjectKey = String;

/// Key of the brand/person/date photo metadata document
pub const PHOTOS_DOCUMENT_KEY: &str = "metadata/photos.json";

/// Key of the sheet-link metadata document
pub const SHEETS_DOCUMENT_KEY: &str = "metadata/sheets.json";

/// Key of the purchase metadata document
pub const PURCHASES_DOCUMENT_KEY: &str = "metadata/purchases.json";
