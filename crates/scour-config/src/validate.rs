//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::{Config, DATABASE_PLACEHOLDER};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The database name is empty.
    EmptyDatabase,
    /// The default language is blank.
    BlankDefaultLanguage,
    /// The index name template does not mention the database.
    TemplateMissingDatabase {
        /// The offending template.
        template: String,
    },
    /// The configured index root exists but is not a directory.
    IndexRootNotDirectory {
        /// Path of the index root.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDatabase => write!(f, "settings.database is empty"),
            Self::BlankDefaultLanguage => write!(f, "settings.default_language is blank"),
            Self::TemplateMissingDatabase { template } => write!(
                f,
                "index.name_template '{template}' does not contain {DATABASE_PLACEHOLDER}; \
                 every database shares one default index"
            ),
            Self::IndexRootNotDirectory { path } => {
                write!(f, "index root is not a directory: {path}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.settings.database.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyDatabase);
    }

    if config.settings.default_language.trim().is_empty() {
        warnings.push(ConfigWarning::BlankDefaultLanguage);
    }

    if !config.index.name_template.contains(DATABASE_PLACEHOLDER) {
        warnings.push(ConfigWarning::TemplateMissingDatabase {
            template: config.index.name_template.clone(),
        });
    }

    if let Some(root) = config.index_root()
        && root.exists()
        && !root.is_dir()
    {
        warnings.push(ConfigWarning::IndexRootNotDirectory {
            path: root.display().to_string(),
        });
    }

    warnings
}
