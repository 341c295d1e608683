//! The resolved, strongly typed search request.

use scour_index::{ContentQuery, Filter, ItemId, LanguageCode, PageWindow};
use serde_json::Value;

use crate::{
    SearchError,
    args::{CursorArg, SearchArgs},
};

/// Argument name of the field equality list, as reported in errors.
const FIELDS_EQUAL: &str = "fieldsEqual";
/// Argument name of the facet list, as reported in errors.
const FACET_ON: &str = "facetOn";

/// One `fieldsEqual` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEquals {
    /// Index field name.
    pub name: String,
    /// Required value.
    pub value: String,
}

impl FieldEquals {
    /// Reads an untyped `{name, value}` entry.
    ///
    /// Strings are taken as-is; numbers and booleans are stringified. Anything else, including
    /// a missing key or `null`, is a [`SearchError::MissingField`]. A name containing NUL is a
    /// [`SearchError::InvalidFieldName`].
    pub fn from_entry(index: usize, entry: &Value) -> Result<Self, SearchError> {
        let read = |field: &'static str| {
            entry
                .get(field)
                .and_then(scalar_string)
                .ok_or(SearchError::MissingField {
                    argument: FIELDS_EQUAL,
                    index,
                    field,
                })
        };
        let name = read("name")?;
        if name.contains('\0') {
            return Err(SearchError::InvalidFieldName {
                argument: FIELDS_EQUAL,
                index,
            });
        }
        Ok(Self {
            name,
            value: read("value")?,
        })
    }
}

/// Stringifies a JSON scalar. Objects, arrays and `null` yield `None`.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Resolved connection paging arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// Keep at most this many hits from the front.
    pub first: Option<usize>,
    /// Keep at most this many hits from the back.
    pub last: Option<usize>,
    /// Exclusive upper cursor.
    pub before: Option<usize>,
    /// Exclusive lower cursor.
    pub after: Option<usize>,
}

impl ConnectionArgs {
    /// Reads and validates the paging arguments of a bag.
    pub fn from_args(args: &SearchArgs) -> Result<Self, SearchError> {
        let read = |arg: Option<&CursorArg>, name: &'static str| arg.map(|a| a.to_usize(name)).transpose();
        Ok(Self {
            first: read(args.first.as_ref(), "first")?,
            last: read(args.last.as_ref(), "last")?,
            before: read(args.before.as_ref(), "before")?,
            after: read(args.after.as_ref(), "after")?,
        })
    }

    /// Offset reported with the page: the `after` cursor, or zero.
    pub fn offset(&self) -> usize {
        self.after.unwrap_or(0)
    }

    /// The index-level paging window.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            first: self.first,
            last: self.last,
            before: self.before,
            after: self.after,
        }
    }
}

/// Reads every `fieldsEqual` entry, failing on the first malformed one.
pub(crate) fn fields_equal(entries: &[Value]) -> Result<Vec<FieldEquals>, SearchError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| FieldEquals::from_entry(index, entry))
        .collect()
}

/// Validates facet names. Blank names and names containing NUL are rejected.
pub(crate) fn facet_on(names: &[String]) -> Result<Vec<String>, SearchError> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if name.trim().is_empty() {
                Err(SearchError::MissingField {
                    argument: FACET_ON,
                    index,
                    field: "name",
                })
            } else if name.contains('\0') {
                Err(SearchError::InvalidFieldName {
                    argument: FACET_ON,
                    index,
                })
            } else {
                Ok(name.clone())
            }
        })
        .collect()
}

/// A search request with every argument resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Ancestor scope.
    pub root: Option<ItemId>,
    /// Non-blank keyword.
    pub keyword: Option<String>,
    /// Language to keep.
    pub language: Option<LanguageCode>,
    /// Keep only latest versions.
    pub latest_version: bool,
    /// Index to query.
    pub index: String,
    /// Equality filters in input order.
    pub fields_equal: Vec<FieldEquals>,
    /// Facet fields in input order.
    pub facet_on: Vec<String>,
    /// Paging arguments.
    pub paging: ConnectionArgs,
}

impl SearchRequest {
    /// Creates a request for an index with defaults for everything else.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            root: None,
            keyword: None,
            language: None,
            latest_version: true,
            index: index.into(),
            fields_equal: Vec::new(),
            facet_on: Vec::new(),
            paging: ConnectionArgs::default(),
        }
    }

    /// The narrowing filters, in application order: root, keyword, language, latest
    /// version, then each field equality.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(root) = &self.root {
            filters.push(Filter::Ancestor(root.clone()));
        }
        if let Some(keyword) = &self.keyword {
            filters.push(Filter::Keyword(keyword.clone()));
        }
        if let Some(language) = &self.language {
            filters.push(Filter::Language(language.clone()));
        }
        if self.latest_version {
            filters.push(Filter::LatestVersion);
        }
        filters.extend(self.fields_equal.iter().map(|f| Filter::FieldEquals {
            name: f.name.clone(),
            value: f.value.clone(),
        }));
        filters
    }

    /// Folds filters, facets and paging onto an empty query.
    pub fn apply(&self, query: ContentQuery) -> ContentQuery {
        let query = self.filters().into_iter().fold(query, ContentQuery::filter);
        let query = self
            .facet_on
            .iter()
            .fold(query, |query, name| query.facet_on(name.as_str()));
        query.page(self.paging.window())
    }
}
