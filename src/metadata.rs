//! Reading and writing sprite box lists
//!
//! The format is chosen from the file extension: `.json` for JSON, `.yaml` or
//! `.yml` for YAML.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::Spritesheet;

/// Serialization format for a box list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    #[default]
    Json,
    Yaml,
}

impl SheetFormat {
    /// Pick a format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, SheetIoError> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(SheetFormat::Json),
            Some("yaml") | Some("yml") => Ok(SheetFormat::Yaml),
            _ => Err(SheetIoError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Error type for box list (de)serialization
#[derive(Debug, Error)]
pub enum SheetIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cannot infer sprite metadata format of '{0}', expected .json, .yaml or .yml")]
    UnknownFormat(String),
}

/// Serialize a sheet in the given format
pub fn to_string(sheet: &Spritesheet, format: SheetFormat) -> Result<String, SheetIoError> {
    match format {
        SheetFormat::Json => Ok(serde_json::to_string(sheet)?),
        SheetFormat::Yaml => Ok(serde_yaml::to_string(sheet)?),
    }
}

/// Parse a sheet in the given format
pub fn from_str(s: &str, format: SheetFormat) -> Result<Spritesheet, SheetIoError> {
    match format {
        SheetFormat::Json => Ok(serde_json::from_str(s)?),
        SheetFormat::Yaml => Ok(serde_yaml::from_str(s)?),
    }
}

/// Load a box list from disk
pub fn load_sheet(path: &Path) -> Result<Spritesheet, SheetIoError> {
    let format = SheetFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    from_str(&content, format)
}

/// Write a box list to disk, creating parent directories as needed
pub fn save_sheet(sheet: &Spritesheet, path: &Path) -> Result<(), SheetIoError> {
    let format = SheetFormat::from_path(path)?;
    let content = to_string(sheet, format)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
