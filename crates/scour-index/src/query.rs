//! Composable content queries.
//!
//! A [`ContentQuery`] is an ordered list of [`Filter`]s, a list of facet field names and an
//! optional [`PageWindow`]. Filters narrow the result set and are combined with AND in the
//! order they were added. Facets never narrow anything; they only ask for value counts over
//! whatever the filters let through.

use std::ops::Range;

use tantivy::{
    Term,
    query::{AllQuery, BooleanQuery, ConstScoreQuery, EmptyQuery, Occur, PhraseQuery, Query, TermQuery},
    schema::{Facet, IndexRecordOption},
    tokenizer::TextAnalyzer,
};

use crate::{
    analyzer::analyze,
    item::ItemId,
    language::LanguageCode,
    schema::{IndexSchema, is_facet_segment},
};

/// A single narrowing condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Keeps documents below the given item.
    Ancestor(ItemId),
    /// Keeps documents whose content contains the keyword.
    Keyword(String),
    /// Keeps documents in the given language.
    Language(LanguageCode),
    /// Keeps only the latest version of each item.
    LatestVersion,
    /// Keeps documents whose named field equals the value.
    FieldEquals {
        /// Field name.
        name: String,
        /// Required value.
        value: String,
    },
}

/// Connection-style paging over integer cursors.
///
/// The hit at absolute position `p` has cursor `p + 1`. `after` keeps hits whose cursor is
/// greater, `before` keeps hits whose cursor is smaller, then `first` and `last` trim the
/// remaining window from the front and back respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    /// Keep at most this many hits from the start of the window.
    pub first: Option<usize>,
    /// Keep at most this many hits from the end of the window.
    pub last: Option<usize>,
    /// Exclusive upper cursor.
    pub before: Option<usize>,
    /// Exclusive lower cursor.
    pub after: Option<usize>,
}

impl PageWindow {
    /// Resolves the window against a total hit count into absolute positions.
    pub fn resolve(&self, total: usize) -> Range<usize> {
        let mut start = self.after.unwrap_or(0).min(total);
        let mut end = self
            .before
            .map_or(total, |before| before.saturating_sub(1).min(total))
            .max(start);

        if let Some(first) = self.first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = self.last {
            start = start.max(end.saturating_sub(last));
        }

        start..end
    }
}

/// A query under construction against a [`crate::SearchContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    /// Filters in application order.
    filters: Vec<Filter>,
    /// Facet field names in request order.
    facets: Vec<String>,
    /// Paging window, if any.
    page: Option<PageWindow>,
}

impl ContentQuery {
    /// Creates a query matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Requests value counts for a field. Repeated names are only counted once.
    #[must_use]
    pub fn facet_on(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.facets.contains(&name) {
            self.facets.push(name);
        }
        self
    }

    /// Sets the paging window.
    #[must_use]
    pub fn page(mut self, window: PageWindow) -> Self {
        self.page = Some(window);
        self
    }

    /// Filters in application order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Requested facet fields.
    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    /// Paging window, or the unbounded window when none was set.
    pub fn window(&self) -> PageWindow {
        self.page.unwrap_or_default()
    }

    /// Compiles the filters into one Tantivy query.
    ///
    /// Only the keyword contributes to scoring; every other filter is wrapped to score zero.
    pub(crate) fn compile(&self, schema: &IndexSchema, analyzer: &TextAnalyzer) -> Box<dyn Query> {
        if self.filters.is_empty() {
            return Box::new(AllQuery);
        }

        let clauses = self
            .filters
            .iter()
            .map(|filter| {
                let query = compile_filter(filter, schema, analyzer);
                let query: Box<dyn Query> = if matches!(filter, Filter::Keyword(_)) {
                    query
                } else {
                    Box::new(ConstScoreQuery::new(query, 0.0))
                };
                (Occur::Must, query)
            })
            .collect();

        Box::new(BooleanQuery::new(clauses))
    }
}

/// Compiles a single filter.
fn compile_filter(filter: &Filter, schema: &IndexSchema, analyzer: &TextAnalyzer) -> Box<dyn Query> {
    match filter {
        Filter::Ancestor(id) => term_query(Term::from_field_text(schema.ancestors, id.as_str())),
        Filter::Keyword(keyword) => keyword_query(keyword, schema, analyzer),
        Filter::Language(code) => term_query(Term::from_field_text(schema.language, code.as_str())),
        Filter::LatestVersion => term_query(Term::from_field_bool(schema.is_latest_version, true)),
        Filter::FieldEquals { name, value } => {
            if !is_facet_segment(name) || !is_facet_segment(value) {
                // Never indexed
                return Box::new(EmptyQuery);
            }
            term_query(Term::from_facet(
                schema.fields,
                &Facet::from_path([name, value]),
            ))
        }
    }
}

/// Builds an exact-term query.
fn term_query(term: Term) -> Box<dyn Query> {
    Box::new(TermQuery::new(term, IndexRecordOption::Basic))
}

/// Builds the content query for a keyword.
///
/// The keyword goes through the content analyzer; several tokens must appear as a phrase.
fn keyword_query(keyword: &str, schema: &IndexSchema, analyzer: &TextAnalyzer) -> Box<dyn Query> {
    let mut terms: Vec<Term> = analyze(analyzer, keyword)
        .iter()
        .map(|token| Term::from_field_text(schema.content, token))
        .collect();

    match terms.len() {
        0 => Box::new(EmptyQuery),
        1 => Box::new(TermQuery::new(
            terms.remove(0),
            IndexRecordOption::WithFreqs,
        )),
        _ => Box::new(PhraseQuery::new(terms)),
    }
}

#[cfg(test)]
mod test {
    use tantivy::tokenizer::Language;

    use super::*;
    use crate::analyzer::build_analyzer;

    fn window(
        first: Option<usize>,
        last: Option<usize>,
        before: Option<usize>,
        after: Option<usize>,
    ) -> PageWindow {
        PageWindow {
            first,
            last,
            before,
            after,
        }
    }

    #[test]
    fn default_window_covers_everything() {
        assert_eq!(PageWindow::default().resolve(7), 0..7);
        assert_eq!(PageWindow::default().resolve(0), 0..0);
    }

    #[test]
    fn first_and_after_page_forward() {
        assert_eq!(window(Some(2), None, None, None).resolve(5), 0..2);
        assert_eq!(window(Some(2), None, None, Some(2)).resolve(5), 2..4);
        assert_eq!(window(Some(2), None, None, Some(4)).resolve(5), 4..5);
        assert_eq!(window(Some(2), None, None, Some(9)).resolve(5), 5..5);
    }

    #[test]
    fn last_and_before_page_backward() {
        assert_eq!(window(None, Some(2), None, None).resolve(5), 3..5);
        // Cursor 4 is position 3, so everything before it is 0..3
        assert_eq!(window(None, Some(2), Some(4), None).resolve(5), 1..3);
        assert_eq!(window(None, None, Some(1), None).resolve(5), 0..0);
    }

    #[test]
    fn first_applies_before_last() {
        assert_eq!(window(Some(4), Some(2), None, None).resolve(10), 2..4);
    }

    #[test]
    fn before_not_after_after_is_empty() {
        assert_eq!(window(None, None, Some(2), Some(3)).resolve(10), 3..3);
    }

    #[test]
    fn zero_first_is_empty() {
        assert_eq!(window(Some(0), None, None, None).resolve(10), 0..0);
    }

    #[test]
    fn builder_keeps_order_and_dedupes_facets() {
        let query = ContentQuery::new()
            .filter(Filter::Keyword("bike".to_string()))
            .filter(Filter::LatestVersion)
            .facet_on("category")
            .facet_on("color")
            .facet_on("category");

        assert_eq!(
            query.filters(),
            &[Filter::Keyword("bike".to_string()), Filter::LatestVersion]
        );
        assert_eq!(query.facets(), &["category", "color"]);
        assert_eq!(query.window(), PageWindow::default());
    }

    #[test]
    fn empty_query_compiles_to_all() {
        let schema = IndexSchema::new();
        let analyzer = build_analyzer(Language::English);
        let compiled = ContentQuery::new().compile(&schema, &analyzer);
        assert!(format!("{compiled:?}").contains("AllQuery"));
    }

    #[test]
    fn keyword_shapes() {
        let schema = IndexSchema::new();
        let analyzer = build_analyzer(Language::English);

        let single = format!("{:?}", keyword_query("Bicycles", &schema, &analyzer));
        assert!(single.contains("TermQuery"), "{single}");

        let phrase = format!("{:?}", keyword_query("mountain bike", &schema, &analyzer));
        assert!(phrase.contains("PhraseQuery"), "{phrase}");

        let empty = format!("{:?}", keyword_query("  !! ", &schema, &analyzer));
        assert!(empty.contains("EmptyQuery"), "{empty}");
    }
}
