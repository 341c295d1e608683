//! Result pages.

use scour_index::ContentSearchResults;
use serde::Serialize;

/// Connection metadata for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the first hit, if any.
    pub start_cursor: Option<String>,
    /// Cursor of the last hit, if any.
    pub end_cursor: Option<String>,
    /// Whether hits exist before this page.
    pub has_previous_page: bool,
    /// Whether hits exist after this page.
    pub has_next_page: bool,
}

impl PageInfo {
    /// Derives connection metadata from a result window.
    pub fn from_results(results: &ContentSearchResults) -> Self {
        Self {
            start_cursor: results.hits.first().map(|h| h.cursor.to_string()),
            end_cursor: results.hits.last().map(|h| h.cursor.to_string()),
            has_previous_page: results.has_previous(),
            has_next_page: results.has_next(),
        }
    }
}

/// A page of search results with the offset used to produce it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    /// The matched documents, totals and facets.
    pub results: ContentSearchResults,
    /// The `after` cursor of the request, or zero.
    pub offset: usize,
    /// Connection metadata.
    pub page_info: PageInfo,
}

impl SearchResultPage {
    /// Wraps results with the request offset.
    pub fn new(results: ContentSearchResults, offset: usize) -> Self {
        let page_info = PageInfo::from_results(&results);
        Self {
            results,
            offset,
            page_info,
        }
    }
}
