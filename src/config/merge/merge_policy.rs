//! Base builder carrying the built-in defaults every source overrides.

use crate::config::storage_paths::{DEFAULT_OBJECTS_PATH, DEFAULT_PUBLIC_URL_BASE};
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("storage.objects_path", DEFAULT_OBJECTS_PATH)?
        .set_default("storage.public_url_base", DEFAULT_PUBLIC_URL_BASE)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
