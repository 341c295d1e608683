//! Configuration system for scour.
//!
//! scour uses TOML configuration files named `.scour.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.scour.toml` files found, then loading `~/.scour.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod location;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use location::index_root;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawIndexSettings, RawSettings, parse_config_file, parse_config_str};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Placeholder in [`IndexSettings::name_template`] replaced by the database name.
pub const DATABASE_PLACEHOLDER: &str = "{database}";

/// Top-level merged configuration for scour.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.scour.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Index-related settings.
    pub index: IndexSettings,
    /// Directory containing the most specific config file (determines index location).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.scour.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the directory holding the named indexes, if one can be determined.
    pub fn index_root(&self) -> Option<PathBuf> {
        index_root(self)
    }

    /// Returns the default index name for the given database.
    ///
    /// The database name is lowercased before being substituted into the template.
    pub fn index_name_for(&self, database: &str) -> String {
        self.index
            .name_template
            .replace(DATABASE_PLACEHOLDER, &database.to_lowercase())
    }

    /// Returns the default index name for the configured database.
    pub fn default_index_name(&self) -> String {
        self.index_name_for(&self.settings.database)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            settings: self.settings.clone(),
            index: self.index.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// General settings for scour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the current content database.
    pub database: String,
    /// Language used when neither the request nor the context names one.
    pub default_language: String,
    /// Language of the calling context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_language: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: String::from("master"),
            default_language: String::from("en"),
            context_language: None,
        }
    }
}

/// Index-related settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Explicit index root, resolved against the config file that set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Template for the default index name.
    pub name_template: String,
    /// Stemming language used for keyword analysis.
    pub stemmer: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            root: None,
            name_template: String::from("content_{database}_index"),
            stemmer: String::from("english"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// General settings.
    settings: Settings,
    /// Index settings.
    index: IndexSettings,
}
