//! Tantivy-backed content indexes for scour.
//!
//! This crate provides the searchable side of a content search request:
//! - The content document schema and JSON-lines ingest
//! - Text analysis with configurable stemming
//! - Named indexes under an index root ([`IndexRegistry`]) behind the [`IndexProvider`] trait
//! - Scoped, snapshot-pinned [`SearchContext`]s
//! - Composable [`ContentQuery`]s with ordered filters, facets and connection paging
//!
//! # Example
//!
//! ```no_run
//! use scour_index::{Filter, IndexProvider, IndexRegistry, Language, PageWindow};
//!
//! let registry = IndexRegistry::new("./indexes", Language::English);
//! let context = registry.open_context("content_master_index").unwrap();
//!
//! let query = context
//!     .queryable()
//!     .filter(Filter::Keyword("bicycle".to_string()))
//!     .filter(Filter::LatestVersion)
//!     .facet_on("category")
//!     .page(PageWindow { first: Some(10), ..PageWindow::default() });
//! let results = context.execute(&query).unwrap();
//! println!("{} matches", results.total);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod context;
mod document;
mod error;
mod execute;
mod item;
mod language;
mod query;
mod registry;
mod result;
mod schema;
mod writer;

pub use analyzer::{CONTENT_TOKENIZER, analyze, build_analyzer, parse_stemmer};
pub use context::SearchContext;
pub use document::{ContentDocument, read_documents};
pub use error::IndexError;
pub use item::{ItemId, ItemKey, normalize_path};
pub use language::{LanguageCode, LanguageParseError};
pub use query::{ContentQuery, Filter, PageWindow};
pub use registry::{IndexInfo, IndexProvider, IndexRegistry};
pub use result::{ContentHit, ContentSearchResults, FacetResult, FacetValue};
pub use schema::IndexSchema;
pub use tantivy::tokenizer::Language;
pub use writer::IndexWriter;
