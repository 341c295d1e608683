//! Query result types.

use std::collections::BTreeMap;

use serde::Serialize;

/// A stored content document returned by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentHit {
    /// Connection cursor of this hit (its absolute position plus one).
    pub cursor: usize,
    /// Relevance score. Filter-only queries score every hit zero.
    pub score: f32,
    /// Normalized item id.
    pub id: String,
    /// Normalized content path.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Language code of this version.
    pub language: String,
    /// Version number.
    pub version: u64,
    /// Whether this is the latest version.
    pub is_latest_version: bool,
    /// Ancestor item ids.
    pub ancestors: Vec<String>,
    /// Free-text content.
    pub content: String,
    /// Named field values.
    pub fields: BTreeMap<String, String>,
}

/// Number of matching documents carrying one value of a faceted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    /// Field value.
    pub value: String,
    /// Matching documents with this value.
    pub count: u64,
}

/// Value distribution of one faceted field over the matching documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetResult {
    /// Field name.
    pub name: String,
    /// Values, most frequent first, ties broken by value.
    pub values: Vec<FacetValue>,
}

/// Result of executing a [`crate::ContentQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSearchResults {
    /// Number of documents matching the filters, before paging.
    pub total: usize,
    /// Absolute position of the first hit in the page.
    pub start: usize,
    /// Hits within the page window, in rank order.
    pub hits: Vec<ContentHit>,
    /// One entry per requested facet, in request order.
    pub facets: Vec<FacetResult>,
}

impl ContentSearchResults {
    /// Absolute position one past the last hit in the page.
    pub fn end(&self) -> usize {
        self.start + self.hits.len()
    }

    /// Returns true if hits exist before this page.
    pub fn has_previous(&self) -> bool {
        self.start > 0
    }

    /// Returns true if hits exist after this page.
    pub fn has_next(&self) -> bool {
        self.end() < self.total
    }

    /// Looks up the facet result for a field.
    pub fn facet(&self, name: &str) -> Option<&FacetResult> {
        self.facets.iter().find(|f| f.name == name)
    }
}
