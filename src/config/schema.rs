//! Configuration schema types for `iconseq.toml`
//!
//! Defines the structure and validation rules for icon conversion settings.

use serde::{Deserialize, Serialize};

use crate::color::ByteOrder;
use crate::header::HeaderOptions;
use crate::import::ImportOptions;

/// Icon geometry section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconConfig {
    /// Target frame width in pixels
    #[serde(default = "default_size")]
    pub width: u16,
    /// Target frame height in pixels
    #[serde(default = "default_size")]
    pub height: u16,
    /// Keep at most this many frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<usize>,
}

fn default_size() -> u16 {
    8
}

impl Default for IconConfig {
    fn default() -> Self {
        Self { width: default_size(), height: default_size(), max_frames: None }
    }
}

/// Header output section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default = "default_true")]
    pub progmem: bool,
    #[serde(default = "default_true")]
    pub include_struct: bool,
    #[serde(default)]
    pub include_guard: bool,
    /// Array values per line (default: one frame row per line, 0: single line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_per_line: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            progmem: true,
            include_struct: true,
            include_guard: false,
            values_per_line: None,
        }
    }
}

/// Complete iconseq.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconseqConfig {
    #[serde(default)]
    pub icon: IconConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "icon.width")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "iconseq.toml: '{}' {}", self.field, self.message)
    }
}

impl IconseqConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.icon.width == 0 {
            errors.push(ConfigValidationError {
                field: "icon.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.icon.height == 0 {
            errors.push(ConfigValidationError {
                field: "icon.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.icon.max_frames == Some(0) {
            errors.push(ConfigValidationError {
                field: "icon.max_frames".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Import options described by this configuration
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            width: self.icon.width,
            height: self.icon.height,
            byte_order: self.output.byte_order,
            max_frames: self.icon.max_frames,
        }
    }

    /// Header options for an icon with the given name
    pub fn header_options(&self, name: impl Into<String>) -> HeaderOptions {
        HeaderOptions {
            name: name.into(),
            progmem: self.output.progmem,
            include_struct: self.output.include_struct,
            include_guard: self.output.include_guard,
            values_per_line: self.output.values_per_line,
        }
    }
}
