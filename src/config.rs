//! Engine configuration.
//!
//! Handles loading, validating, and merging `docnav.toml`. Stock defaults
//! describe the conventional layout (MDX files under `src/content`, `meta.json`
//! sidecars); a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "src/content"  # Root of the content tree
//! sidecar_file = "meta.json"    # Per-directory ordering/title override file
//! extensions = ["mdx"]          # Content file extensions (no leading dot)
//! index_stem = "index"          # File stem that stands for its directory
//!
//! [sections]
//! sort = "order"                # order | alphabetical | date | section
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::ordering::SortMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in a directory.
pub const CONFIG_FILENAME: &str = "docnav.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Engine configuration loaded from `docnav.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Root directory of the content tree.
    pub content_root: String,
    /// File name of the per-directory sidecar.
    pub sidecar_file: String,
    /// Recognized content extensions, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Stem of the file that represents its enclosing directory.
    pub index_stem: String,
    /// Section aggregator settings.
    pub sections: SectionsConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            content_root: "src/content".to_string(),
            sidecar_file: "meta.json".to_string(),
            extensions: vec!["mdx".to_string()],
            index_stem: "index".to_string(),
            sections: SectionsConfig::default(),
        }
    }
}

/// Section aggregator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionsConfig {
    /// Sort mode applied to the units inside each section.
    pub sort: SortMode,
}

impl IndexConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "extensions entries must be non-empty and have no leading dot, got {ext:?}"
            )));
        }
        if self.sidecar_file.is_empty() || self.sidecar_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "sidecar_file must be a plain file name".into(),
            ));
        }
        if self.is_content_file(&self.sidecar_file) {
            return Err(ConfigError::Validation(format!(
                "sidecar_file {:?} must not use a content extension",
                self.sidecar_file
            )));
        }
        if self.index_stem.is_empty() || self.index_stem.contains('/') {
            return Err(ConfigError::Validation(
                "index_stem must be a plain file stem".into(),
            ));
        }
        Ok(())
    }

    pub fn content_root(&self) -> PathBuf {
        PathBuf::from(&self.content_root)
    }

    /// Whether a file name carries one of the recognized content extensions.
    pub fn is_content_file(&self, file_name: &str) -> bool {
        self.content_stem(file_name).is_some()
    }

    /// The file name without its content extension, if it has one.
    pub fn content_stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
            .then_some(stem)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(IndexConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<IndexConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `docnav.toml` from the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<IndexConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILENAME))
}

/// Load a config from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<IndexConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock `docnav.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docnav Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Root of the content tree. Every content file below it becomes a page whose
# slug is its path relative to this directory.
content_root = "src/content"

# Per-directory sidecar carrying `title`, `order`, `pages`, `folders` and
# `sections` overrides. Sidecars are optional; a broken one is ignored with
# a warning.
sidecar_file = "meta.json"

# Content file extensions, without the leading dot. Matched case-insensitively.
extensions = ["mdx"]

# A file with this stem stands for its directory: `guides/index.mdx` gets the
# slug `guides`.
index_stem = "index"

# ---------------------------------------------------------------------------
# Section listings
# ---------------------------------------------------------------------------
[sections]
# How pages are ordered inside each section:
#   order        explicit order first, then slug
#   alphabetical title only
#   date         newest `updatedAt` first
#   section      top-level segment, then explicit order, then title
sort = "order"
"##
}
