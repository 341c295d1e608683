//! Scoped search contexts.
//!
//! A [`SearchContext`] pins one reader snapshot of a named index. Everything done through the
//! context sees the same committed state, and the snapshot is released when the context is
//! dropped.

use std::path::Path;

use tantivy::{
    DocAddress, Index, IndexReader, ReloadPolicy, Searcher, TantivyDocument, Term,
    collector::TopDocs,
    directory::MmapDirectory,
    query::TermQuery,
    schema::{IndexRecordOption, Value},
    tokenizer::{Language, TextAnalyzer},
};
use tracing::debug;

use crate::{
    IndexError,
    analyzer::{CONTENT_TOKENIZER, build_analyzer},
    execute,
    item::{ItemId, ItemKey},
    query::ContentQuery,
    result::ContentSearchResults,
    schema::IndexSchema,
};

/// An open, read-only view of one index.
pub struct SearchContext {
    /// Index name.
    name: String,
    /// Reader the snapshot was taken from. Held so the snapshot stays pinned.
    _reader: IndexReader,
    /// Point-in-time searcher.
    searcher: Searcher,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Content analyzer used for keywords.
    analyzer: TextAnalyzer,
}

impl std::fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SearchContext {
    /// Opens the index stored at `path` and takes a reader snapshot.
    pub fn open(name: &str, path: &Path, stemmer: Language) -> Result<Self, IndexError> {
        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;
        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let analyzer = build_analyzer(stemmer);
        index
            .tokenizers()
            .register(CONTENT_TOKENIZER, analyzer.clone());

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        let searcher = reader.searcher();

        debug!(index = name, docs = searcher.num_docs(), "opened search context");

        Ok(Self {
            name: name.to_string(),
            _reader: reader,
            searcher,
            schema: IndexSchema::new(),
            analyzer,
        })
    }

    /// Name of the index this context reads.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of documents visible in the snapshot.
    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }

    /// Starts a query matching every document.
    pub fn queryable(&self) -> ContentQuery {
        ContentQuery::new()
    }

    /// Executes a query against the snapshot.
    pub fn execute(&self, query: &ContentQuery) -> Result<ContentSearchResults, IndexError> {
        let compiled = query.compile(&self.schema, &self.analyzer);
        debug!(index = %self.name, filters = ?query.filters(), facets = ?query.facets(), "executing query");
        execute::run(&self.searcher, &self.schema, compiled.as_ref(), query)
    }

    /// Finds the id of an item by id or path.
    ///
    /// An id also resolves when the item is not indexed itself but appears among the
    /// ancestors of an indexed document. Returns `None` if neither is the case.
    pub fn find_item(&self, key: &ItemKey) -> Result<Option<ItemId>, IndexError> {
        let term = match key {
            ItemKey::Id(id) => Term::from_field_text(self.schema.id, id.as_str()),
            ItemKey::Path(path) => Term::from_field_text(self.schema.path, path),
        };
        let Some(address) = self.first_match(term)? else {
            return match key {
                ItemKey::Id(id) => self.find_ancestor(id),
                ItemKey::Path(_) => Ok(None),
            };
        };

        let doc: TantivyDocument = self
            .searcher
            .doc(address)
            .map_err(|e| IndexError::search(&e))?;
        Ok(doc
            .get_first(self.schema.id)
            .and_then(|v| v.as_str())
            .and_then(ItemId::new))
    }

    /// Returns the id if any document lists it as an ancestor.
    fn find_ancestor(&self, id: &ItemId) -> Result<Option<ItemId>, IndexError> {
        let term = Term::from_field_text(self.schema.ancestors, id.as_str());
        let found = self.first_match(term)?.is_some();
        if found {
            debug!(index = %self.name, id = %id, "item only indexed as an ancestor");
        }
        Ok(found.then(|| id.clone()))
    }

    /// Address of the first document containing `term`.
    fn first_match(&self, term: Term) -> Result<Option<DocAddress>, IndexError> {
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let top_docs = self
            .searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(|e| IndexError::search(&e))?;
        Ok(top_docs.first().map(|(_, address)| *address))
    }
}

impl Drop for SearchContext {
    fn drop(&mut self) {
        debug!(index = %self.name, "released search context");
    }
}
