//! Query execution against a reader snapshot.

use std::collections::BTreeMap;

use tantivy::{
    DocAddress, Searcher, TantivyDocument,
    collector::{Count, FacetCollector, FacetCounts, TopDocs},
    query::Query,
    schema::{Facet, Field, Value},
};
use tracing::debug;

use crate::{
    IndexError,
    query::ContentQuery,
    result::{ContentHit, ContentSearchResults, FacetResult, FacetValue},
    schema::{FIELDS_FIELD, IndexSchema, is_facet_segment},
};

/// Runs a compiled query: counts and facets over every match, then fetches the page window.
pub(crate) fn run(
    searcher: &Searcher,
    schema: &IndexSchema,
    compiled: &dyn Query,
    query: &ContentQuery,
) -> Result<ContentSearchResults, IndexError> {
    let facet_names: Vec<&str> = query
        .facets()
        .iter()
        .map(String::as_str)
        .filter(|name| !name.trim().is_empty() && is_facet_segment(name))
        .collect();

    let mut facet_collector = FacetCollector::for_field(FIELDS_FIELD);
    for name in &facet_names {
        facet_collector.add_facet(Facet::from_path([name]));
    }

    let (total, facet_counts) = searcher
        .search(compiled, &(Count, facet_collector))
        .map_err(|e| IndexError::search(&e))?;

    let window = query.window().resolve(total);
    debug!(total, start = window.start, end = window.end, "query matched");

    let mut hits = Vec::with_capacity(window.len());
    // TopDocs rejects a zero limit
    if !window.is_empty() {
        let top_docs = searcher
            .search(
                compiled,
                &TopDocs::with_limit(window.len()).and_offset(window.start),
            )
            .map_err(|e| IndexError::search(&e))?;

        for (i, (score, address)) in top_docs.into_iter().enumerate() {
            let mut hit = read_hit(searcher, schema, address)?;
            hit.cursor = window.start + i + 1;
            hit.score = score;
            hits.push(hit);
        }
    }

    let facets = facet_names
        .iter()
        .map(|name| facet_result(&facet_counts, name))
        .collect();

    Ok(ContentSearchResults {
        total,
        start: window.start,
        hits,
        facets,
    })
}

/// Collects the value counts under `/name`, most frequent first.
fn facet_result(counts: &FacetCounts, name: &str) -> FacetResult {
    let mut values: Vec<FacetValue> = counts
        .get(Facet::from_path([name]))
        .filter_map(|(facet, count)| {
            let value = facet.to_path().last()?.to_string();
            Some(FacetValue { value, count })
        })
        .collect();
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    FacetResult {
        name: name.to_string(),
        values,
    }
}

/// Loads the stored fields of a document.
pub(crate) fn read_hit(
    searcher: &Searcher,
    schema: &IndexSchema,
    address: DocAddress,
) -> Result<ContentHit, IndexError> {
    let doc: TantivyDocument = searcher
        .doc(address)
        .map_err(|e| IndexError::search(&e))?;

    let fields: BTreeMap<String, String> = doc
        .get_first(schema.field_values)
        .and_then(|v| v.as_str())
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| IndexError::Search(format!("corrupt stored fields: {e}")))?
        .unwrap_or_default();

    Ok(ContentHit {
        cursor: 0,
        score: 0.0,
        id: text(&doc, schema.id),
        path: text(&doc, schema.path),
        name: text(&doc, schema.name),
        language: text(&doc, schema.language),
        version: doc
            .get_first(schema.version)
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
        is_latest_version: doc
            .get_first(schema.is_latest_version)
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        ancestors: doc
            .get_all(schema.ancestors)
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        content: text(&doc, schema.content),
        fields,
    })
}

/// Reads a text field, returning an empty string if missing.
fn text(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
