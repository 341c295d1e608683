//! Configuration file parsing.
//!
//! Parses individual `.scour.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Index settings section.
    pub index: Option<RawIndexSettings>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Name of the current content database.
    pub database: Option<String>,
    /// Fallback language.
    pub default_language: Option<String>,
    /// Language of the calling context.
    pub context_language: Option<String>,
}

/// Raw index settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Index root directory, relative to the config file.
    pub root: Option<String>,
    /// Default index name template.
    pub name_template: Option<String>,
    /// Stemming language.
    pub stemmer: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.settings.is_none());
        assert!(config.index.is_none());
    }

    #[test]
    fn test_parse_full_settings() {
        let toml = r#"
[settings]
database = "web"
default_language = "da-DK"
context_language = "en"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let settings = config.settings.unwrap();
        assert_eq!(settings.database.as_deref(), Some("web"));
        assert_eq!(settings.default_language.as_deref(), Some("da-DK"));
        assert_eq!(settings.context_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_partial_index_settings() {
        let toml = r#"
[index]
stemmer = "german"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let index = config.index.unwrap();
        assert_eq!(index.stemmer.as_deref(), Some("german"));
        assert!(index.root.is_none());
        assert!(index.name_template.is_none());
    }

    #[test]
    fn test_parse_root_flag() {
        let config = parse_config_str("root = true\n", Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml_reports_path() {
        let err = parse_config_str("[settings\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_wrong_type_fails() {
        let toml = r#"
[settings]
database = 42
"#;
        assert!(parse_config(toml).is_err());
    }
}
