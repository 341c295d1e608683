//! Search request translation for scour.
//!
//! A search request arrives as a loose argument bag ([`SearchArgs`]), the shape of the
//! variables of a GraphQL `search` field. [`SearchTranslator`] resolves it into a strongly
//! typed [`SearchRequest`] and runs it as a single composed query against an index obtained
//! from an [`IndexProvider`](scour_index::IndexProvider):
//!
//! 1. root scope (resolved through an [`ItemResolver`])
//! 2. keyword
//! 3. language (argument, then context language, then configured default)
//! 4. latest version only (default)
//! 5. each `fieldsEqual` pair, ANDed
//! 6. each `facetOn` field
//! 7. connection paging (`first`, `last`, `before`, `after`)
//!
//! The result is a [`SearchResultPage`]: the matching documents, facet counts and the
//! offset the page was taken at.

#![warn(missing_docs)]

mod args;
mod error;
mod page;
mod request;
mod resolver;
mod translator;

pub use args::{CursorArg, SearchArgs};
pub use error::SearchError;
pub use page::{PageInfo, SearchResultPage};
pub use request::{ConnectionArgs, FieldEquals, SearchRequest};
pub use resolver::{IndexItemResolver, ItemResolver};
pub use translator::{RequestContext, SearchTranslator};
