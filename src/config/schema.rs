//! Configuration schema types for `locator.toml`
//!
//! ```toml
//! [detect]
//! margin = 4
//! min_height = 0
//! extract = false
//!
//! [sort]
//! enabled = true
//! margin = 0
//! ```

use serde::{Deserialize, Serialize};

use crate::detect::{DetectOptions, DEFAULT_MARGIN};

/// Sprite detection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Largest background gap bridged inside one sprite
    #[serde(default = "default_margin")]
    pub margin: i32,
    /// Minimum sprite height, 0 to keep everything
    #[serde(default)]
    pub min_height: u32,
    /// Write each located sprite to its own PNG
    #[serde(default)]
    pub extract: bool,
    /// Crop extracted sprites to their box instead of keeping sheet size
    #[serde(default)]
    pub crop: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self { margin: default_margin(), min_height: 0, extract: false, crop: false }
    }
}

fn default_margin() -> i32 {
    DEFAULT_MARGIN
}

impl From<&DetectConfig> for DetectOptions {
    fn from(config: &DetectConfig) -> Self {
        DetectOptions::new(config.margin, config.min_height)
    }
}

/// Row sorting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Reorder located sprites into rows before writing
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Slack around each box when testing row membership
    #[serde(default)]
    pub margin: u32,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { enabled: true, margin: 0 }
    }
}

fn default_true() -> bool {
    true
}

/// Root configuration structure for `locator.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorConfig {
    #[serde(default)]
    pub detect: DetectConfig,
    #[serde(default)]
    pub sort: SortConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "detect.margin")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid configuration: '{}' {}", self.field, self.message)
    }
}

impl LocatorConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.detect.margin < 0 {
            errors.push(ConfigValidationError {
                field: "detect.margin".to_string(),
                message: format!("must be zero or greater, got {}", self.detect.margin),
            });
        }

        if self.detect.crop && !self.detect.extract {
            errors.push(ConfigValidationError {
                field: "detect.crop".to_string(),
                message: "has no effect unless detect.extract is enabled".to_string(),
            });
        }

        errors
    }

    /// Detection options described by this configuration
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions::from(&self.detect)
    }
}
