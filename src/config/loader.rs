//! Configuration loading and discovery for `locator.toml`
//!
//! Provides functions to find, load, and merge configuration. Command-line
//! flags (which also read `PIXEL_MARGIN`, `MIN_IMAGE_HEIGHT` and
//! `EXTRACT_SPRITES` from the environment) take precedence over the file.

use super::schema::LocatorConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "locator.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse locator.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override detection margin
    pub margin: Option<i32>,
    /// Override minimum sprite height
    pub min_height: Option<u32>,
    /// Override sprite extraction
    pub extract: Option<bool>,
    /// Override cropping of extracted sprites
    pub crop: Option<bool>,
    /// Enable or disable row sorting
    pub sort: Option<bool>,
    /// Override row sorting margin
    pub sort_margin: Option<u32>,
}

/// Find `locator.toml` by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find `locator.toml` by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a `locator.toml` file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. Without any config file the defaults apply.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&Path>) -> Result<LocatorConfig, ConfigError> {
    resolve_config(path, &CliOverrides::default())
}

/// Load the configuration, apply CLI overrides, and validate the result.
///
/// Validation runs after merging, so a flag can repair a file value that
/// would be rejected on its own.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if the
/// merged configuration is invalid.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<LocatorConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    let mut config = match config_path {
        Some(p) => {
            log::debug!("loading configuration from {}", p.display());
            load_config_file(&p)?
        }
        None => LocatorConfig::default(),
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Parse a configuration file without validating it.
fn load_config_file(path: &Path) -> Result<LocatorConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut LocatorConfig, overrides: &CliOverrides) {
    if let Some(margin) = overrides.margin {
        config.detect.margin = margin;
    }
    if let Some(min_height) = overrides.min_height {
        config.detect.min_height = min_height;
    }
    if let Some(extract) = overrides.extract {
        config.detect.extract = extract;
    }
    if let Some(crop) = overrides.crop {
        config.detect.crop = crop;
    }
    if let Some(sort) = overrides.sort {
        config.sort.enabled = sort;
    }
    if let Some(sort_margin) = overrides.sort_margin {
        config.sort.margin = sort_margin;
    }
}
