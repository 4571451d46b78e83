//! CLI Tooling
//!
//! Command-line interface for portal operations. Every command runs as one
//! role against the object store configured for the portal root.

use crate::access::Role;
use crate::commands::{
    DeleteRequest, PortalCommandService, PurchaseRequest, RenameRequest, SheetRequest,
    SheetTarget, UploadFile, UploadRequest,
};
use crate::config::{ConfigLoader, PortalConfig};
use crate::error::{ApiError, StorageError};
use crate::format::{
    format_gallery_text, format_purchases_text, format_sheets_text, format_status_text,
};
use crate::objects::{FsObjectStore, ObjectStore};
use crate::views::AssetFilter;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Portal CLI - brand/person/date photo portal
#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Photo portal organised by brand, person and date")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Portal root directory; the default object store lives in its XDG data directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Role to act as (admin, boss)
    #[arg(long, default_value = "admin")]
    pub role: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload images under a brand, person and date
    Upload {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        person: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Gallery category (main, other, other2, sales)
        #[arg(long)]
        category: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Change the display name of an uploaded image
    Rename {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: String,
        /// Current file name
        old_name: String,
        /// New name; without a "." it keeps the old extension
        new_name: String,
    },
    /// Delete an uploaded image and its record
    Delete {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: String,
        /// File name to delete
        name: String,
    },
    /// Show a gallery view
    Gallery {
        /// View (main, other, other2, sales, all)
        #[arg(long, default_value = "main")]
        view: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Manage spreadsheet links
    Sheet {
        #[command(subcommand)]
        command: SheetCommands,
    },
    /// Manage purchase records
    Purchase {
        #[command(subcommand)]
        command: PurchaseCommands,
    },
    /// Show document counts
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
pub enum SheetCommands {
    /// Attach a spreadsheet to a brand/person/date
    Add {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: String,
        /// Spreadsheet id
        #[arg(long)]
        sheet_id: String,
        /// Display name (default: "Sales Data")
        #[arg(long)]
        name: Option<String>,
    },
    /// Detach the spreadsheet of a brand/person/date
    Remove {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: String,
    },
    /// List attached spreadsheets
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum PurchaseCommands {
    /// Record a purchase
    Add {
        #[arg(long)]
        date: String,
        #[arg(long)]
        supplier: String,
        /// Free-text purchase ids
        #[arg(long, default_value = "")]
        purchase_ids: String,
        /// Free-text total
        #[arg(long, default_value = "")]
        total: String,
        /// Free-text return information
        #[arg(long, default_value = "")]
        return_info: String,
        /// Invoice photo (repeatable)
        #[arg(long = "invoice")]
        invoices: Vec<PathBuf>,
        /// Product photo (repeatable)
        #[arg(long = "product")]
        products: Vec<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List purchases, newest first
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove a purchase and its photos
    Remove {
        /// Purchase id
        id: String,
    },
}

/// CLI context: configuration, acting role and the command service.
pub struct CliContext {
    service: PortalCommandService,
    role: Role,
    config: PortalConfig,
}

impl CliContext {
    /// Create a new CLI context backed by the filesystem object store.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>, role: &str) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        let objects_path = config.storage.resolve_objects_path(&root)?;
        std::fs::create_dir_all(&objects_path).map_err(StorageError::IoError)?;

        let objects: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new(
            &objects_path,
            config.storage.public_url_base.clone(),
        ));
        info!(objects = %objects_path.display(), "Opened object store");

        Self::with_objects(objects, config, role)
    }

    /// Create a context over an existing object store.
    pub fn with_objects(
        objects: Arc<dyn ObjectStore>,
        config: PortalConfig,
        role: &str,
    ) -> Result<Self, ApiError> {
        let role: Role = role.parse()?;
        let service = PortalCommandService::new(objects, config.access.clone());
        Ok(Self {
            service,
            role,
            config,
        })
    }

    pub fn service(&self) -> &PortalCommandService {
        &self.service
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Upload {
                files,
                brand,
                person,
                date,
                category,
                format,
            } => {
                let result = self.service.upload(
                    self.role,
                    UploadRequest {
                        brand: brand.clone(),
                        person: person.clone(),
                        date: date.clone(),
                        category: category.clone(),
                        files: read_files(files)?,
                    },
                )?;
                if format == "json" {
                    return to_json(&result);
                }
                let mut out = format!(
                    "Uploaded {} files to {}/{}/{}\n",
                    result.stored.len(),
                    result.brand,
                    result.person,
                    result.date
                );
                for record in &result.stored {
                    out.push_str(&format!("  {} -> {}\n", record.name, record.url));
                }
                Ok(out)
            }
            Commands::Rename {
                brand,
                person,
                date,
                old_name,
                new_name,
            } => {
                let result = self.service.rename(
                    self.role,
                    RenameRequest {
                        brand: brand.clone(),
                        person: person.clone(),
                        date: date.clone(),
                        old_name: old_name.clone(),
                        new_name: new_name.clone(),
                    },
                )?;
                Ok(match result.new_name {
                    Some(new_name) => format!("Renamed {} to {}", result.old_name, new_name),
                    None => format!("No file named {}", result.old_name),
                })
            }
            Commands::Delete {
                brand,
                person,
                date,
                name,
            } => {
                let result = self.service.delete(
                    self.role,
                    DeleteRequest {
                        brand: brand.clone(),
                        person: person.clone(),
                        date: date.clone(),
                        name: name.clone(),
                    },
                )?;
                Ok(match result.removed {
                    Some(record) => format!("Deleted {}", record.name),
                    None => format!("No file named {}", name),
                })
            }
            Commands::Gallery { view, format } => {
                let view: AssetFilter = view.parse().map_err(ApiError::ValidationError)?;
                let result = self.service.gallery(self.role, view)?;
                if format == "json" {
                    return to_json(&result);
                }
                Ok(format_gallery_text(&result))
            }
            Commands::Sheet { command } => self.handle_sheet_command(command),
            Commands::Purchase { command } => self.handle_purchase_command(command),
            Commands::Status { format } => {
                let status = self.service.status()?;
                if format == "json" {
                    return to_json(&status);
                }
                Ok(format_status_text(&status))
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    fn handle_sheet_command(&self, command: &SheetCommands) -> Result<String, ApiError> {
        match command {
            SheetCommands::Add {
                brand,
                person,
                date,
                sheet_id,
                name,
            } => {
                let sheet = self.service.add_sheet(
                    self.role,
                    SheetRequest {
                        brand: brand.clone(),
                        person: person.clone(),
                        date: date.clone(),
                        sheet_id: sheet_id.clone(),
                        display_name: name.clone(),
                    },
                )?;
                Ok(format!(
                    "Attached \"{}\" to {}/{}/{}\n  {}",
                    sheet.display_name, sheet.brand, sheet.person, sheet.date, sheet.embed_url
                ))
            }
            SheetCommands::Remove {
                brand,
                person,
                date,
            } => {
                self.service.remove_sheet(
                    self.role,
                    SheetTarget {
                        brand: brand.clone(),
                        person: person.clone(),
                        date: date.clone(),
                    },
                )?;
                Ok(format!("Detached sheet from {}/{}/{}", brand, person, date))
            }
            SheetCommands::List { format } => {
                let sheets = self.service.list_sheets(self.role)?;
                if format == "json" {
                    return to_json(&sheets);
                }
                Ok(format_sheets_text(&sheets))
            }
        }
    }

    fn handle_purchase_command(&self, command: &PurchaseCommands) -> Result<String, ApiError> {
        match command {
            PurchaseCommands::Add {
                date,
                supplier,
                purchase_ids,
                total,
                return_info,
                invoices,
                products,
                format,
            } => {
                let record = self.service.add_purchase(
                    self.role,
                    PurchaseRequest {
                        date: date.clone(),
                        supplier: supplier.clone(),
                        purchase_ids_text: purchase_ids.clone(),
                        total_text: total.clone(),
                        return_info_text: return_info.clone(),
                        invoice_photos: read_files(invoices)?,
                        product_photos: read_files(products)?,
                    },
                )?;
                if format == "json" {
                    return to_json(&record);
                }
                Ok(format!(
                    "Recorded purchase {} ({} invoice, {} product photos)",
                    record.id,
                    record.invoice_photo_urls.len(),
                    record.product_photo_urls.len()
                ))
            }
            PurchaseCommands::List { format } => {
                let purchases = self.service.list_purchases(self.role)?;
                if format == "json" {
                    return to_json(&purchases);
                }
                Ok(format_purchases_text(&purchases))
            }
            PurchaseCommands::Remove { id } => {
                Ok(match self.service.remove_purchase(self.role, id)? {
                    Some(record) => format!("Removed purchase {}", record.id),
                    None => format!("No purchase {}", id),
                })
            }
        }
    }
}

/// Read files from disk, keeping only the final path component as the name.
fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>, ApiError> {
    paths.iter().map(|path| read_file(path)).collect()
}

fn read_file(path: &Path) -> Result<UploadFile, ApiError> {
    let body = std::fs::read(path).map_err(StorageError::IoError)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadFile { name, body })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string())))
}
