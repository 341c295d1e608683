//! Named index registry.
//!
//! Every index lives in its own directory under the index root, so `content_master_index`
//! is stored at `<root>/content_master_index/`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use scour_config::Config;
use tantivy::tokenizer::Language;

use crate::{IndexError, analyzer::parse_stemmer, context::SearchContext, writer::IndexWriter};

/// File Tantivy writes into every index directory.
const META_FILE: &str = "meta.json";

/// Maps index names to executable search contexts.
pub trait IndexProvider {
    /// Opens a scoped context on the named index.
    fn open_context(&self, name: &str) -> Result<SearchContext, IndexError>;
}

/// Summary of one index under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    /// Index name.
    pub name: String,
    /// Index directory.
    pub path: PathBuf,
    /// Committed document count.
    pub num_docs: u64,
}

/// On-disk registry of named indexes.
#[derive(Debug, Clone)]
pub struct IndexRegistry {
    /// Directory holding one subdirectory per index.
    root: PathBuf,
    /// Stemmer shared by writers and contexts.
    stemmer: Language,
}

impl IndexRegistry {
    /// Creates a registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, stemmer: Language) -> Self {
        Self {
            root: root.into(),
            stemmer,
        }
    }

    /// Creates a registry from configuration.
    pub fn from_config(config: &Config) -> Result<Self, IndexError> {
        let root = config.index_root().ok_or(IndexError::NoIndexRoot)?;
        let stemmer = parse_stemmer(&config.index.stemmer)?;
        Ok(Self::new(root, stemmer))
    }

    /// Directory holding the indexes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the named index. The name is validated but the directory may not exist.
    pub fn index_path(&self, name: &str) -> Result<PathBuf, IndexError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(IndexError::InvalidIndexName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Returns true if the named index has been created.
    pub fn exists(&self, name: &str) -> bool {
        self.index_path(name)
            .is_ok_and(|path| path.join(META_FILE).is_file())
    }

    /// Opens a writer on the named index, creating it if needed.
    pub fn writer(&self, name: &str) -> Result<IndexWriter, IndexError> {
        let path = self.index_path(name)?;
        IndexWriter::open(&path, self.stemmer)
    }

    /// Lists every index under the root, sorted by name.
    pub fn list(&self) -> Result<Vec<IndexInfo>, IndexError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str()
                && self.exists(name)
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        names
            .into_iter()
            .map(|name| {
                let context = self.open_context(&name)?;
                Ok(IndexInfo {
                    path: self.root.join(&name),
                    num_docs: context.num_docs(),
                    name,
                })
            })
            .collect()
    }
}

impl IndexProvider for IndexRegistry {
    fn open_context(&self, name: &str) -> Result<SearchContext, IndexError> {
        let path = self.index_path(name)?;
        if !self.exists(name) {
            return Err(IndexError::UnknownIndex {
                name: name.to_string(),
                root: self.root.clone(),
            });
        }
        SearchContext::open(name, &path, self.stemmer)
    }
}
