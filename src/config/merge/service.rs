//! MergeService: orchestrates sources, applies merge policy, deserializes to PortalConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::PortalConfig;
use config::{ConfigError, File};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the root directory and standard sources.
    /// Precedence: defaults (lowest) -> global file -> root `portal.toml` -> environment (highest).
    pub fn load(root: &Path) -> Result<PortalConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay; the global
    /// and root files are skipped.
    pub fn load_from_file(path: &Path) -> Result<PortalConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
