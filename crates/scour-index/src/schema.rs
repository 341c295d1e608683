//! Index schema for content documents.
//!
//! - `key`: `id:language:version` upsert key (string, not stored)
//! - `id`: normalized item id (string, stored)
//! - `path`: normalized content path (string, stored)
//! - `name`: display name (stored only)
//! - `ancestors`: ids of every ancestor item (string, stored, multi-valued)
//! - `content`: free text (analyzed with positions, stored)
//! - `language`: normalized language code (string, stored)
//! - `version`: version number (stored only)
//! - `is_latest_version`: latest-version flag (indexed, stored)
//! - `fields`: named field values as `/name/value` facets (filtering and faceting)
//! - `field_values`: the same named fields as stored JSON (retrieval)

use tantivy::schema::{
    FacetOptions, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing,
    TextOptions,
};

use crate::analyzer::CONTENT_TOKENIZER;

/// Name of the facet field holding named field values.
pub const FIELDS_FIELD: &str = "fields";

/// Whether `segment` can be stored as one facet path segment.
///
/// Tantivy separates facet segments with NUL, so a segment containing one would alias a
/// nested facet.
pub(crate) fn is_facet_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('\0')
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Upsert key for one item version.
    pub key: Field,
    /// Normalized item id.
    pub id: Field,
    /// Normalized content path.
    pub path: Field,
    /// Display name.
    pub name: Field,
    /// Ancestor item ids.
    pub ancestors: Field,
    /// Free-text content.
    pub content: Field,
    /// Language code.
    pub language: Field,
    /// Version number.
    pub version: Field,
    /// Latest-version flag.
    pub is_latest_version: Field,
    /// Named field values as facets.
    pub fields: Field,
    /// Named field values as stored JSON.
    pub field_values: Field,
}

impl IndexSchema {
    /// Creates the content schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let key = builder.add_text_field("key", STRING);
        let id = builder.add_text_field("id", STRING | STORED);
        let path = builder.add_text_field("path", STRING | STORED);
        let name = builder.add_text_field("name", STORED);
        let ancestors = builder.add_text_field("ancestors", STRING | STORED);

        // Positions are needed for multi-word keyword phrases
        let content_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(CONTENT_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();
        let content = builder.add_text_field("content", content_options);

        let language = builder.add_text_field("language", STRING | STORED);
        let version = builder.add_u64_field("version", STORED);
        let is_latest_version = builder.add_bool_field("is_latest_version", INDEXED | STORED);
        let fields = builder.add_facet_field(FIELDS_FIELD, FacetOptions::default());
        let field_values = builder.add_text_field("field_values", STORED);

        let schema = builder.build();

        Self {
            schema,
            key,
            id,
            path,
            name,
            ancestors,
            content,
            language,
            version,
            is_latest_version,
            fields,
            field_values,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
