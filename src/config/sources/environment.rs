//! Environment variable source: PORTAL_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses PORTAL_ prefix and __ as separator for nested keys; brand exclusion
/// lists are comma separated.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("PORTAL")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("access.admin.excluded_brands")
            .with_list_parse_key("access.boss.excluded_brands")
            .try_parsing(true),
    );
    Ok(builder)
}
