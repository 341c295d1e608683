//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, Settings,
    parse::{RawConfig, RawIndexSettings, RawSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// CWD), lowest precedence last (global config). For every scalar the first defined value
/// wins. A relative `index.root` is resolved against the directory of the file that set it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut settings = Settings::default();
    let mut index = IndexSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.settings {
            apply_raw_settings(&mut settings, raw);
        }
        if let Some(ref raw) = parsed.config.index {
            apply_raw_index(&mut index, raw, &parsed.path)?;
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    Ok(Config {
        settings,
        index,
        config_root,
    })
}

/// Applies raw settings to result, overwriting any present values.
fn apply_raw_settings(result: &mut Settings, raw: &RawSettings) {
    if let Some(ref v) = raw.database {
        result.database = v.clone();
    }
    if let Some(ref v) = raw.default_language {
        result.default_language = v.clone();
    }
    if let Some(ref v) = raw.context_language {
        result.context_language = Some(v.clone());
    }
}

/// Applies raw index settings to result, resolving the root against `source`.
fn apply_raw_index(
    result: &mut IndexSettings,
    raw: &RawIndexSettings,
    source: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref root) = raw.root {
        let config_dir = source.parent().unwrap_or(source);
        result.root = Some(resolve_path(root, config_dir)?);
    }
    if let Some(ref v) = raw.name_template {
        result.name_template = v.clone();
    }
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
    Ok(())
}
