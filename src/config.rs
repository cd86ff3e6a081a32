//! Configuration module.
//!
//! Loads `config.toml` from a directory (default: the working directory),
//! layers it over stock defaults and validates the result.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [fields]
//! selector_suffix = "_selector"  # sibling property holding the selector chain
//! query_suffix = "_query"        # sibling property holding the query string
//! anchor_suffix = "_anchor"      # sibling property holding the anchor
//!
//! [locales]
//! default = "en"
//! available = ["en"]
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Sibling property naming for stored extended links.
    pub fields: FieldsConfig,
    /// Site locales used by locale resolution.
    pub locales: LocaleConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffixes = [
            ("fields.selector_suffix", &self.fields.selector_suffix),
            ("fields.query_suffix", &self.fields.query_suffix),
            ("fields.anchor_suffix", &self.fields.anchor_suffix),
        ];
        for (name, suffix) in suffixes {
            if suffix.is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        if self.fields.selector_suffix == self.fields.query_suffix
            || self.fields.selector_suffix == self.fields.anchor_suffix
            || self.fields.query_suffix == self.fields.anchor_suffix
        {
            return Err(ConfigError::Validation(
                "fields suffixes must be distinct".into(),
            ));
        }
        if self.locales.available.is_empty() {
            return Err(ConfigError::Validation(
                "locales.available must not be empty".into(),
            ));
        }
        if !self.locales.available.contains(&self.locales.default) {
            return Err(ConfigError::Validation(format!(
                "locales.default \"{}\" is not listed in locales.available",
                self.locales.default
            )));
        }
        Ok(())
    }
}

/// Suffixes appended to a link field's name to get its sibling properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldsConfig {
    pub selector_suffix: String,
    pub query_suffix: String,
    pub anchor_suffix: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            selector_suffix: "_selector".to_string(),
            query_suffix: "_query".to_string(),
            anchor_suffix: "_anchor".to_string(),
        }
    }
}

/// Locales the site is published in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Fallback when a requested locale matches nothing.
    pub default: String,
    /// Published locales, e.g. `["en", "de", "de_CH"]`.
    pub available: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
            available: vec!["en".to_string()],
        }
    }
}

// =============================================================================
// Loading: stock defaults, then the directory's `config.toml` on top
// =============================================================================

/// The built-in suffixes and locales as a TOML table.
///
/// A site's `config.toml` is sparse, so it is always applied over this.
pub fn defaults_layer() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overrides` over `layer`.
///
/// `[fields]` and `[locales]` are tables, so a file that sets only
/// `locales.default` keeps the stock `available` list and every suffix.
/// Arrays and scalars are taken from `overrides` as a whole.
pub fn layer_toml(layer: toml::Value, overrides: toml::Value) -> toml::Value {
    match (layer, overrides) {
        (toml::Value::Table(mut table), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let layered = match table.remove(&key) {
                    Some(below) => layer_toml(below, value),
                    None => value,
                };
                table.insert(key, layered);
            }
            toml::Value::Table(table)
        }
        (_, replacement) => replacement,
    }
}

/// The site's own settings from `<dir>/config.toml`, if the file exists.
pub fn read_overrides(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        log::debug!("no {} in {}, using defaults", CONFIG_FILENAME, dir.display());
        return Ok(None);
    }
    let overrides = toml::from_str(&fs::read_to_string(&path)?)?;
    log::debug!("read link field and locale overrides from {}", path.display());
    Ok(Some(overrides))
}

/// Build a [`SiteConfig`] from `layer` plus optional overrides.
///
/// Unknown keys and invalid suffix or locale settings are errors.
pub fn apply_overrides(
    layer: toml::Value,
    overrides: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let layered = match overrides {
        Some(overrides) => layer_toml(layer, overrides),
        None => layer,
    };
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The site configuration for `dir`: stock defaults with its `config.toml`
/// laid over them, validated.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    apply_overrides(defaults_layer(), read_overrides(dir)?)
}

/// A fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# extended-link configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Stored link fields
# ---------------------------------------------------------------------------
# A link field named "link" keeps its base in "link" and the remaining
# components in sibling properties named with these suffixes.
[fields]
selector_suffix = "_selector"
query_suffix = "_query"
anchor_suffix = "_anchor"

# ---------------------------------------------------------------------------
# Site locales
# ---------------------------------------------------------------------------
[locales]
# Used when a requested locale matches none of the available ones.
default = "en"
# Published locales. "de" also matches requests for "de-AT".
available = ["en"]
"##
}
