//! Configuration
//!
//! Layered configuration built with the `config` crate: built-in defaults,
//! then the global file, then `<root>/portal.toml`, then `PORTAL__*`
//! environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage_paths;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage_paths::StorageConfig;

use crate::access::AccessConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Application directory name under the XDG base directories.
pub const APP_DIR: &str = "photo-portal";

/// Name of the per-root configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "portal.toml";

/// Complete portal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub access: AccessConfig,
}
