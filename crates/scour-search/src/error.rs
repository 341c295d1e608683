//! Error types for the scour-search crate.

use scour_index::IndexError;
use thiserror::Error;

/// Errors that can occur while translating or executing a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The argument bag is not valid JSON of the expected shape.
    #[error("invalid search arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    /// A `fieldsEqual` entry lacks a name or value, or a facet name is blank.
    #[error("{argument}[{index}] is missing '{field}'")]
    MissingField {
        /// Argument holding the malformed entry.
        argument: &'static str,
        /// Position of the entry in the list.
        index: usize,
        /// Key that could not be read.
        field: &'static str,
    },

    /// A `fieldsEqual` or `facetOn` name contains a NUL character.
    #[error("{argument}[{index}] has a name containing NUL")]
    InvalidFieldName {
        /// Argument holding the offending entry.
        argument: &'static str,
        /// Position of the entry in the list.
        index: usize,
    },

    /// A paging argument is not a non-negative integer.
    #[error("invalid value for '{argument}': {value}")]
    InvalidCursor {
        /// Paging argument name.
        argument: &'static str,
        /// Offending value as given.
        value: String,
    },

    /// The index provider failed.
    #[error(transparent)]
    Index(#[from] IndexError),
}
