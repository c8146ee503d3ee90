//! Configuration loading and discovery for `iconseq.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::IconseqConfig;
use crate::color::ByteOrder;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "iconseq.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse iconseq.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub max_frames: Option<usize>,
    pub byte_order: Option<ByteOrder>,
    pub progmem: Option<bool>,
    pub include_guard: Option<bool>,
    pub values_per_line: Option<usize>,
}

/// Find iconseq.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for iconseq.toml
/// 2. Check XDG_CONFIG_HOME/iconseq/iconseq.toml (or ~/.config/iconseq/iconseq.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find iconseq.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("iconseq").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find iconseq.toml by walking up from a specific directory.
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

/// Load configuration from an iconseq.toml file.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses `find_config()`, falling back to defaults when nothing is found.
pub fn load_config(path: Option<&Path>) -> Result<IconseqConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(IconseqConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<IconseqConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: IconseqConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged config is
/// validated again, since overrides can introduce invalid values.
pub fn merge_cli_overrides(
    config: &mut IconseqConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(width) = overrides.width {
        config.icon.width = width;
    }
    if let Some(height) = overrides.height {
        config.icon.height = height;
    }
    if let Some(max_frames) = overrides.max_frames {
        config.icon.max_frames = Some(max_frames);
    }
    if let Some(byte_order) = overrides.byte_order {
        config.output.byte_order = byte_order;
    }
    if let Some(progmem) = overrides.progmem {
        config.output.progmem = progmem;
    }
    if let Some(include_guard) = overrides.include_guard {
        config.output.include_guard = include_guard;
    }
    if let Some(values_per_line) = overrides.values_per_line {
        config.output.values_per_line = Some(values_per_line);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}
