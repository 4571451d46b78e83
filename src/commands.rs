//! Portal command service: one entry point per portal use case.
//!
//! Each mutating command authorizes the role, validates the request before
//! touching storage, then loads the whole document, mutates it and saves it
//! back. Nothing here locks: two writers racing lose one update.

use crate::access::{AccessConfig, AccessPolicy, Role};
use crate::documents::DocumentStore;
use crate::error::{ApiError, StorageError};
use crate::hierarchy::{
    self, asset_file_name, asset_storage_key, AssetRecord, Category, HierarchyPath, PhotoDocument,
};
use crate::objects::{content_type_for, ObjectStore};
use crate::purchases::{self, PhotoKind, PurchaseDocument, PurchaseRecord};
use crate::sheets::{self, ActiveSheet, SheetDocument};
use crate::types::{PHOTOS_DOCUMENT_KEY, PURCHASES_DOCUMENT_KEY, SHEETS_DOCUMENT_KEY};
use crate::views::{self, AssetFilter, BrandView};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_BRAND: &str = "DefaultBrand";
pub const DEFAULT_PERSON: &str = "DefaultPerson";
pub const DEFAULT_DATE: &str = "NoDate";

/// Millisecond timestamp source used for storage keys and purchase ids.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// A file received for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub brand: Option<String>,
    pub person: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub files: Vec<UploadFile>,
}

/// Result of upload command.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub brand: String,
    pub person: String,
    pub date: String,
    pub stored: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct RenameRequest {
    pub brand: String,
    pub person: String,
    pub date: String,
    pub old_name: String,
    pub new_name: String,
}

/// Result of rename command. `new_name` is None when nothing matched.
#[derive(Debug, Clone, Serialize)]
pub struct RenameResult {
    pub old_name: String,
    pub new_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub brand: String,
    pub person: String,
    pub date: String,
    pub name: String,
}

/// Result of delete command. `removed` is None when nothing matched.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub removed: Option<AssetRecord>,
}

/// Result of gallery command.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryResult {
    pub role: Role,
    pub view: AssetFilter,
    pub brands: Vec<BrandView>,
}

#[derive(Debug, Clone, Default)]
pub struct SheetRequest {
    pub brand: String,
    pub person: String,
    pub date: String,
    pub sheet_id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SheetTarget {
    pub brand: String,
    pub person: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseRequest {
    pub date: String,
    pub supplier: String,
    pub purchase_ids_text: String,
    pub total_text: String,
    pub return_info_text: String,
    pub invoice_photos: Vec<UploadFile>,
    pub product_photos: Vec<UploadFile>,
}

/// Counts shown by the status command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortalStatus {
    pub brands: usize,
    pub persons: usize,
    pub dates: usize,
    pub assets: usize,
    pub active_sheets: usize,
    pub purchases: usize,
}

pub struct PortalCommandService {
    objects: Arc<dyn ObjectStore>,
    photos: DocumentStore<PhotoDocument>,
    sheets: DocumentStore<SheetDocument>,
    purchases: DocumentStore<PurchaseDocument>,
    access: AccessConfig,
    clock: Clock,
}

impl PortalCommandService {
    pub fn new(objects: Arc<dyn ObjectStore>, access: AccessConfig) -> Self {
        Self {
            photos: DocumentStore::new(Arc::clone(&objects), PHOTOS_DOCUMENT_KEY),
            sheets: DocumentStore::new(Arc::clone(&objects), SHEETS_DOCUMENT_KEY),
            purchases: DocumentStore::new(Arc::clone(&objects), PURCHASES_DOCUMENT_KEY),
            objects,
            access,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn photos(&self) -> &DocumentStore<PhotoDocument> {
        &self.photos
    }

    pub fn sheets(&self) -> &DocumentStore<SheetDocument> {
        &self.sheets
    }

    pub fn purchases(&self) -> &DocumentStore<PurchaseDocument> {
        &self.purchases
    }

    fn policy(&self, role: Role) -> AccessPolicy {
        AccessPolicy::new(role, &self.access)
    }

    /// Store uploaded images under brand/person/date and record them.
    ///
    /// Files are stored one at a time. If one fails, the records of the files
    /// already stored are still saved and the failure is returned.
    pub fn upload(&self, role: Role, request: UploadRequest) -> Result<UploadResult, ApiError> {
        self.policy(role).verify_write()?;
        if request.files.is_empty() {
            return Err(ApiError::ValidationError("No files uploaded".to_string()));
        }

        let path = HierarchyPath::new(
            or_default(request.brand.as_deref(), DEFAULT_BRAND),
            or_default(request.person.as_deref(), DEFAULT_PERSON),
            or_default(request.date.as_deref(), DEFAULT_DATE),
        );
        let category = Category::for_upload(request.category.as_deref());

        let mut doc = self.photos.load()?;
        let mut stored = Vec::new();
        let mut failure = None;

        for file in &request.files {
            let file_name = asset_file_name((self.clock)(), &file.name);
            let storage_key = asset_storage_key(&path, &file_name);

            let content_type = content_type_for(&file.name);
            if let Err(e) = self.objects.put(&storage_key, &file.body, content_type) {
                tracing::error!(key = %storage_key, "Upload failed: {}", e);
                failure = Some(e);
                break;
            }

            let record = AssetRecord {
                name: file_name,
                url: self.objects.public_url(&storage_key),
                storage_key,
                category: Some(category.clone()),
            };
            hierarchy::insert_asset(
                &mut doc,
                &path.brand,
                &path.person,
                &path.date,
                record.clone(),
            );
            stored.push(record);
        }

        if !stored.is_empty() {
            self.photos.save(&doc)?;
            tracing::info!(path = %path, count = stored.len(), category = %category, "Uploaded assets");
        }
        if let Some(e) = failure {
            return Err(e.into());
        }

        Ok(UploadResult {
            brand: path.brand,
            person: path.person,
            date: path.date,
            stored,
        })
    }

    /// Rename an asset's display name; a missing target is a silent no-op.
    pub fn rename(&self, role: Role, request: RenameRequest) -> Result<RenameResult, ApiError> {
        self.policy(role).verify_write()?;
        require(&[
            ("brand", request.brand.as_str()),
            ("person", request.person.as_str()),
            ("date", request.date.as_str()),
            ("old name", request.old_name.as_str()),
            ("new name", request.new_name.as_str()),
        ])?;

        let mut doc = self.photos.load()?;
        let new_name = hierarchy::rename_asset(
            &mut doc,
            &request.brand,
            &request.person,
            &request.date,
            &request.old_name,
            request.new_name.trim(),
        );
        if new_name.is_some() {
            self.photos.save(&doc)?;
            tracing::info!(old = %request.old_name, new = ?new_name, "Renamed asset");
        }

        Ok(RenameResult {
            old_name: request.old_name,
            new_name,
        })
    }

    /// Delete an asset's object and its metadata record.
    ///
    /// A failed object delete is logged and the record is still removed.
    pub fn delete(&self, role: Role, request: DeleteRequest) -> Result<DeleteResult, ApiError> {
        self.policy(role).verify_write()?;
        require(&[
            ("brand", request.brand.as_str()),
            ("person", request.person.as_str()),
            ("date", request.date.as_str()),
            ("file name", request.name.as_str()),
        ])?;

        let mut doc = self.photos.load()?;
        let Some(record) = hierarchy::find_asset(
            &doc,
            &request.brand,
            &request.person,
            &request.date,
            &request.name,
        ) else {
            return Ok(DeleteResult { removed: None });
        };

        if let Err(e) = self.objects.delete(&record.storage_key) {
            tracing::warn!(key = %record.storage_key, "Failed to delete object: {}", e);
        }

        let removed = hierarchy::delete_asset(
            &mut doc,
            &request.brand,
            &request.person,
            &request.date,
            &request.name,
        );
        self.photos.save(&doc)?;
        tracing::info!(name = %request.name, "Deleted asset");

        Ok(DeleteResult { removed })
    }

    /// Gallery view for a role: authorization first, then projection.
    pub fn gallery(&self, role: Role, view: AssetFilter) -> Result<GalleryResult, ApiError> {
        let policy = self.policy(role);
        policy.verify_view(view)?;

        let doc = self.photos.load()?;
        let brands = views::project_filter(&doc, view, &policy.excluded_brands);
        Ok(GalleryResult { role, view, brands })
    }

    /// Attach a spreadsheet to a raw brand/person/date.
    pub fn add_sheet(&self, role: Role, request: SheetRequest) -> Result<ActiveSheet, ApiError> {
        self.policy(role).verify_write()?;
        require(&[
            ("brand", request.brand.as_str()),
            ("person", request.person.as_str()),
            ("date", request.date.as_str()),
            ("sheet id", request.sheet_id.as_str()),
        ])?;

        let mut doc = self.sheets.load()?;
        sheets::upsert(
            &mut doc,
            &request.brand,
            &request.person,
            &request.date,
            request.sheet_id.trim(),
            request.display_name.as_deref(),
        );
        self.sheets.save(&doc)?;

        let key = sheets::composite_key(&request.brand, &request.person, &request.date);
        tracing::info!(key = %key, "Added sheet");
        let link = doc.get(&key).cloned().unwrap_or_default();
        Ok(ActiveSheet {
            brand: request.brand,
            person: request.person,
            date: request.date,
            sheet_id: link.sheet_id.unwrap_or_default(),
            display_name: link.display_name.unwrap_or_default(),
            embed_url: link.embed_url.unwrap_or_default(),
        })
    }

    /// Detach the spreadsheet of a raw brand/person/date.
    pub fn remove_sheet(&self, role: Role, target: SheetTarget) -> Result<(), ApiError> {
        self.policy(role).verify_write()?;
        require(&[
            ("brand", target.brand.as_str()),
            ("person", target.person.as_str()),
            ("date", target.date.as_str()),
        ])?;

        let mut doc = self.sheets.load()?;
        sheets::remove(&mut doc, &target.brand, &target.person, &target.date);
        self.sheets.save(&doc)?;
        tracing::info!(
            key = %sheets::composite_key(&target.brand, &target.person, &target.date),
            "Removed sheet"
        );
        Ok(())
    }

    pub fn list_sheets(&self, _role: Role) -> Result<Vec<ActiveSheet>, ApiError> {
        let doc = self.sheets.load()?;
        Ok(sheets::list_active(&doc))
    }

    /// Record a purchase and store its invoice and product photos.
    ///
    /// As with uploads, photos stored before a failure stay recorded; when
    /// the first photo fails nothing is recorded.
    pub fn add_purchase(
        &self,
        role: Role,
        request: PurchaseRequest,
    ) -> Result<PurchaseRecord, ApiError> {
        self.policy(role).verify_write()?;
        require(&[
            ("date", request.date.as_str()),
            ("supplier", request.supplier.as_str()),
        ])?;

        let id = purchases::purchase_id(&request.date, &request.supplier, (self.clock)());
        let mut record = PurchaseRecord {
            id: id.clone(),
            date: request.date.trim().to_string(),
            supplier: request.supplier.trim().to_string(),
            purchase_ids_text: request.purchase_ids_text,
            invoice_photo_urls: Vec::new(),
            product_photo_urls: Vec::new(),
            total_text: request.total_text,
            return_info_text: request.return_info_text,
        };

        let mut doc = self.purchases.load()?;
        let failure = self
            .store_purchase_photos(
                &id,
                PhotoKind::Invoice,
                &request.invoice_photos,
                &mut record.invoice_photo_urls,
            )
            .and_then(|()| {
                self.store_purchase_photos(
                    &id,
                    PhotoKind::Product,
                    &request.product_photos,
                    &mut record.product_photo_urls,
                )
            })
            .err();

        if let Some(e) = failure {
            if !record.invoice_photo_urls.is_empty() || !record.product_photo_urls.is_empty() {
                purchases::insert(&mut doc, record);
                self.purchases.save(&doc)?;
            }
            return Err(e.into());
        }

        purchases::insert(&mut doc, record.clone());
        self.purchases.save(&doc)?;

        tracing::info!(id = %id, "Added purchase");
        Ok(record)
    }

    /// Store photos in order, appending each stored photo's URL to `urls`.
    fn store_purchase_photos(
        &self,
        id: &str,
        kind: PhotoKind,
        files: &[UploadFile],
        urls: &mut Vec<String>,
    ) -> Result<(), StorageError> {
        for (index, file) in files.iter().enumerate() {
            let key = purchases::purchase_asset_key(id, kind, index, &file.name);
            if let Err(e) = self
                .objects
                .put(&key, &file.body, content_type_for(&file.name))
            {
                tracing::error!(key = %key, "Purchase photo upload failed: {}", e);
                return Err(e);
            }
            urls.push(self.objects.public_url(&key));
        }
        Ok(())
    }

    pub fn list_purchases(&self, _role: Role) -> Result<Vec<PurchaseRecord>, ApiError> {
        let doc = self.purchases.load()?;
        Ok(purchases::list(&doc).into_iter().cloned().collect())
    }

    /// Remove a purchase and, best effort, its photos.
    pub fn remove_purchase(
        &self,
        role: Role,
        id: &str,
    ) -> Result<Option<PurchaseRecord>, ApiError> {
        self.policy(role).verify_write()?;
        require(&[("purchase id", id)])?;

        let mut doc = self.purchases.load()?;
        let Some(removed) = purchases::remove(&mut doc, id) else {
            return Ok(None);
        };

        for url in removed
            .invoice_photo_urls
            .iter()
            .chain(&removed.product_photo_urls)
        {
            let Some(key) = self
                .objects
                .key_from_url(url)
                .filter(|key| purchases::is_purchase_asset_key(key, &removed.id))
            else {
                tracing::warn!(url = %url, "Photo URL is not in this store, skipping");
                continue;
            };
            if let Err(e) = self.objects.delete(&key) {
                tracing::warn!(key = %key, "Failed to delete purchase photo: {}", e);
            }
        }

        self.purchases.save(&doc)?;
        tracing::info!(id = %id, "Removed purchase");
        Ok(Some(removed))
    }

    /// Counts over all three documents.
    pub fn status(&self) -> Result<PortalStatus, ApiError> {
        let photos = self.photos.load()?;
        let sheet_doc = self.sheets.load()?;
        let purchase_doc = self.purchases.load()?;

        let persons = photos.brands.values().flat_map(|b| b.persons.values());
        Ok(PortalStatus {
            brands: photos.brands.len(),
            persons: persons.clone().count(),
            dates: persons.map(|p| p.dates.len()).sum(),
            assets: photos.asset_count(),
            active_sheets: sheets::list_active(&sheet_doc).len(),
            purchases: purchase_doc.len(),
        })
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(default)
}

fn require(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationError(format!(
            "Missing data: {}",
            missing.join(", ")
        )))
    }
}
