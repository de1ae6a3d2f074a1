//! Tool configuration module.
//!
//! Handles loading, validating, and merging `catalog-press.toml`. The file is
//! optional: stock defaults describe the standard content layout, and a user
//! file overrides only the keys it names.
//!
//! ## Config File Location
//!
//! `catalog-press.toml` is read from the working directory, or from the path
//! given with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! catalog_root = "/catalogs"            # Folder holding one subfolder per catalogue
//! listing_endpoint = "/api/catalogs"    # Directory-listing service
//! manifest = "/catalogs/index.json"     # Static fallback list
//! global_config = "/config.json"        # Site-wide branding strings
//! catalog_config_file = "config.json"   # Per-catalogue config, inside the catalogue folder
//! section_document_file = "content.json"
//! slider_document_file = "slider.json"  # Optional, inside hero/
//!
//! [discovery]
//! max_hero_slides = 20                  # Upper bound on hero probes
//! hero_prefix = "hero_"
//! hero_extension = "jpg"
//!
//! [http]
//! timeout_secs = 10
//! user_agent = "catalog-press"
//!
//! [processing]
//! max_processes = 4                     # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, override just the values you want:
//!
//! ```toml
//! [discovery]
//! hero_extension = "webp"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "catalog-press.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Loader configuration loaded from `catalog-press.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Well-known content paths.
    pub content: ContentConfig,
    /// Hero slide probing.
    pub discovery: DiscoveryConfig,
    /// Remote origin settings.
    pub http: HttpConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl LoaderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let root_relative = [
            ("content.catalog_root", &self.content.catalog_root),
            ("content.manifest", &self.content.manifest),
            ("content.global_config", &self.content.global_config),
        ];
        for (key, value) in root_relative {
            if !value.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must start with '/'"
                )));
            }
        }
        let endpoint = &self.content.listing_endpoint;
        if !(endpoint.starts_with('/') || endpoint.starts_with("http")) {
            return Err(ConfigError::Validation(
                "content.listing_endpoint must start with '/' or be a URL".into(),
            ));
        }

        let file_names = [
            ("content.catalog_config_file", &self.content.catalog_config_file),
            ("content.section_document_file", &self.content.section_document_file),
            ("content.slider_document_file", &self.content.slider_document_file),
        ];
        for (key, value) in file_names {
            if value.is_empty() || value.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name"
                )));
            }
        }

        if !(1..=100).contains(&self.discovery.max_hero_slides) {
            return Err(ConfigError::Validation(
                "discovery.max_hero_slides must be 1-100".into(),
            ));
        }
        if self.discovery.hero_extension.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.hero_extension must not be empty".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Well-known paths of the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Folder holding one subfolder per catalogue.
    pub catalog_root: String,
    /// Directory-listing service returning `{ "catalogs": [...] }`.
    pub listing_endpoint: String,
    /// Static fallback list with the same shape as the listing.
    pub manifest: String,
    /// Site-wide branding document.
    pub global_config: String,
    /// Per-catalogue config, relative to the catalogue folder.
    pub catalog_config_file: String,
    /// Section document, relative to the section folder.
    pub section_document_file: String,
    /// Optional slide list, relative to the hero folder.
    pub slider_document_file: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            catalog_root: "/catalogs".to_string(),
            listing_endpoint: "/api/catalogs".to_string(),
            manifest: "/catalogs/index.json".to_string(),
            global_config: "/config.json".to_string(),
            catalog_config_file: "config.json".to_string(),
            section_document_file: "content.json".to_string(),
            slider_document_file: "slider.json".to_string(),
        }
    }
}

/// Hero slide probing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Upper bound on probes per catalogue.
    pub max_hero_slides: usize,
    /// Filename prefix before the two-digit index.
    pub hero_prefix: String,
    /// Filename extension, without the dot.
    pub hero_extension: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_hero_slides: 20,
            hero_prefix: "hero_".to_string(),
            hero_extension: "jpg".to_string(),
        }
    }
}

/// Remote origin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("catalog-press/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers loading catalogues.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(LoaderConfig::default())?)
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
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LoaderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LoaderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `catalog-press.toml` file.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<LoaderConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `catalog-press.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# catalog-press configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Content layout
# ---------------------------------------------------------------------------
[content]
# Folder holding one subfolder per catalogue.
catalog_root = "/catalogs"

# Directory-listing service. Must answer { "catalogs": ["id", ...] }.
listing_endpoint = "/api/catalogs"

# Static fallback list, used when the listing fails or is empty.
manifest = "/catalogs/index.json"

# Site-wide branding strings (brandName, siteTitle, ...).
global_config = "/config.json"

# Per-catalogue config, inside each catalogue folder.
catalog_config_file = "config.json"

# Section document, inside each section folder.
section_document_file = "content.json"

# Optional explicit slide list, inside the hero folder.
slider_document_file = "slider.json"

# ---------------------------------------------------------------------------
# Hero slide discovery
# ---------------------------------------------------------------------------
[discovery]
# Probes hero_00.jpg, hero_01.jpg, ... until the first gap, at most this many.
max_hero_slides = 20
hero_prefix = "hero_"
hero_extension = "jpg"

# ---------------------------------------------------------------------------
# Remote origin
# ---------------------------------------------------------------------------
[http]
# Per-request timeout in seconds.
timeout_secs = 10
# user_agent = "catalog-press/<version>"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers when loading many catalogues.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
