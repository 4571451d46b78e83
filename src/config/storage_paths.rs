//! StorageConfig and resolution of the object store directory.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder meaning "use the root's XDG data directory".
pub const DEFAULT_OBJECTS_PATH: &str = ".portal/objects";

/// URL prefix assets are served from when nothing is configured.
pub const DEFAULT_PUBLIC_URL_BASE: &str = "http://localhost:3000/uploads";

fn default_objects_path() -> PathBuf {
    PathBuf::from(DEFAULT_OBJECTS_PATH)
}

fn default_public_url_base() -> String {
    DEFAULT_PUBLIC_URL_BASE.to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding objects (relative paths resolve against the root)
    #[serde(default = "default_objects_path")]
    pub objects_path: PathBuf,

    /// Storage root URL; an asset's public URL is this plus its key
    #[serde(default = "default_public_url_base")]
    pub public_url_base: String,
}

impl StorageConfig {
    /// Resolve the object directory. The default lives under the root's own
    /// XDG data directory; anything else is taken relative to `root`.
    pub fn resolve_objects_path(&self, root: &Path) -> Result<PathBuf, ApiError> {
        if self.objects_path == default_objects_path() {
            return Ok(xdg::root_data_dir(root)?.join("objects"));
        }
        Ok(root.join(&self.objects_path))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            objects_path: default_objects_path(),
            public_url_base: default_public_url_base(),
        }
    }
}
