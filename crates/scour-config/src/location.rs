//! Index root resolution.
//!
//! Named indexes live in `.scour/indexes/` beside the most specific `.scour.toml`, or in
//! `~/.scour/indexes/` when only the global config exists. An explicit `index.root` setting
//! overrides both.

use std::path::PathBuf;

use crate::Config;

/// Directory name for scour data (sibling to `.scour.toml`).
const SCOUR_DIR: &str = ".scour";
/// Subdirectory within `.scour` holding one directory per index.
const INDEXES_DIR: &str = "indexes";

/// Computes the index root for a configuration.
///
/// Returns `None` when no configuration file was found and no explicit root is set.
pub fn index_root(config: &Config) -> Option<PathBuf> {
    if let Some(root) = &config.index.root {
        return Some(root.clone());
    }

    config
        .config_root
        .as_ref()
        .map(|dir| dir.join(SCOUR_DIR).join(INDEXES_DIR))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_config_means_no_root() {
        assert!(index_root(&Config::default()).is_none());
    }

    #[test]
    fn root_sits_beside_config_file() {
        let config = Config {
            config_root: Some(PathBuf::from("/srv/site")),
            ..Default::default()
        };
        assert_eq!(
            index_root(&config),
            Some(PathBuf::from("/srv/site/.scour/indexes"))
        );
    }

    #[test]
    fn explicit_root_wins() {
        let mut config = Config {
            config_root: Some(PathBuf::from("/srv/site")),
            ..Default::default()
        };
        config.index.root = Some(PathBuf::from("/var/lib/scour"));
        assert_eq!(index_root(&config), Some(PathBuf::from("/var/lib/scour")));
    }
}
