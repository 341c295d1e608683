//! Error types for the scour-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when working with content indexes.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// No index with this name exists under the index root.
    #[error("unknown index '{name}' (looked in {root})")]
    UnknownIndex {
        /// Requested index name.
        name: String,
        /// Directory that was searched.
        root: PathBuf,
    },

    /// Neither an explicit index root nor a config file location is known.
    #[error("no index root configured (run `scour init` or set index.root)")]
    NoIndexRoot,

    /// Index names are restricted to ASCII alphanumerics, `_` and `-`.
    #[error("invalid index name: '{0}'")]
    InvalidIndexName(String),

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Query execution failed.
    #[error("search failed: {0}")]
    Search(String),

    /// A document could not be decoded.
    #[error("invalid document on line {line}: {message}")]
    Document {
        /// 1-based input line.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidStemmer(String),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}
