//! XDG Base Directory utilities for portal data and configuration.

use crate::config::APP_DIR;
use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// `$XDG_DATA_HOME/photo-portal`
pub fn portal_data_dir() -> Result<PathBuf, ApiError> {
    let data_home = data_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(data_home.join(APP_DIR))
}

/// `$XDG_DATA_HOME/photo-portal/<canonical root path>`: data directory of one
/// portal root, so two roots never share defaults.
pub fn root_data_dir(root: &Path) -> Result<PathBuf, ApiError> {
    let canonical = root.canonicalize().map_err(|e| {
        ApiError::ConfigError(format!(
            "Failed to canonicalize portal root {}: {}",
            root.display(),
            e
        ))
    })?;

    let data_dir = canonical
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .fold(portal_data_dir()?, |dir, name| dir.join(name));
    Ok(data_dir)
}

/// `$XDG_CONFIG_HOME/photo-portal/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}
