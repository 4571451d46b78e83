//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::PortalConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the standard files under `root` and the environment.
    pub fn load(root: &Path) -> Result<PortalConfig, ConfigError> {
        MergeService::load(root)
    }

    /// Load configuration from a specific file plus the environment.
    pub fn load_from_file(path: &Path) -> Result<PortalConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> PortalConfig {
        PortalConfig::default()
    }
}
