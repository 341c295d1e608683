//! Index writer for adding content documents to a Tantivy index.

use std::{fs, path::Path};

use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, Term, directory::MmapDirectory,
    schema::Facet, tokenizer::Language,
};
use tracing::debug;

use crate::{
    analyzer::{CONTENT_TOKENIZER, build_analyzer},
    document::ContentDocument,
    error::IndexError,
    item::{ItemId, normalize_path},
    language::LanguageCode,
    schema::{IndexSchema, is_facet_segment},
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes content documents to a Tantivy index.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl IndexWriter {
    /// Opens or creates an index at the given path.
    pub fn open(path: &Path, stemmer: Language) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();

        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index
            .tokenizers()
            .register(CONTENT_TOKENIZER, build_analyzer(stemmer));

        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Stages a document, replacing any earlier copy of the same item version.
    ///
    /// Ids and ancestors are normalized, the path is lowercased and the language is
    /// canonicalized when it parses. Blank field names or values are not indexed as facets.
    pub fn add_document(&mut self, doc: &ContentDocument) -> Result<(), IndexError> {
        let id = ItemId::new(&doc.id)
            .ok_or_else(|| IndexError::Write("document id must not be blank".to_string()))?;
        let language = doc
            .language
            .parse::<LanguageCode>()
            .map_or_else(|_| doc.language.trim().to_string(), |code| code.to_string());
        let key = version_key(&id, &language, doc.version);

        self.writer
            .delete_term(Term::from_field_text(self.schema.key, &key));

        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(self.schema.key, &key);
        tantivy_doc.add_text(self.schema.id, id.as_str());
        tantivy_doc.add_text(self.schema.path, normalize_path(&doc.path));
        tantivy_doc.add_text(self.schema.name, &doc.name);
        for ancestor in doc
            .ancestors
            .iter()
            .map(String::as_str)
            .filter_map(ItemId::new)
        {
            tantivy_doc.add_text(self.schema.ancestors, ancestor.as_str());
        }
        tantivy_doc.add_text(self.schema.content, &doc.content);
        tantivy_doc.add_text(self.schema.language, &language);
        tantivy_doc.add_u64(self.schema.version, doc.version);
        tantivy_doc.add_bool(self.schema.is_latest_version, doc.is_latest_version);

        for (name, value) in &doc.fields {
            if name.trim().is_empty() || !is_facet_segment(name) || !is_facet_segment(value) {
                continue;
            }
            tantivy_doc.add_facet(self.schema.fields, Facet::from_path([name, value]));
        }
        let field_values =
            serde_json::to_string(&doc.fields).map_err(|e| IndexError::Write(e.to_string()))?;
        tantivy_doc.add_text(self.schema.field_values, &field_values);

        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Adds multiple documents to the index.
    pub fn add_documents(&mut self, docs: &[ContentDocument]) -> Result<(), IndexError> {
        for doc in docs {
            self.add_document(doc)?;
        }
        debug!(count = docs.len(), "staged documents");
        Ok(())
    }

    /// Commits all pending changes to the index.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Rolls back any uncommitted changes.
    pub fn rollback(&mut self) -> Result<(), IndexError> {
        self.writer.rollback().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Deletes all documents from the index.
    pub fn delete_all(&mut self) -> Result<(), IndexError> {
        self.writer
            .delete_all_documents()
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Returns the number of committed documents in the index.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| IndexError::Write(e.to_string()))?;
        Ok(reader.searcher().num_docs())
    }
}

/// Builds the upsert key for one version of an item in one language.
fn version_key(id: &ItemId, language: &str, version: u64) -> String {
    format!("{id}:{language}:{version}")
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    fn doc(id: &str, language: &str, version: u64) -> ContentDocument {
        ContentDocument {
            id: id.to_string(),
            path: format!("/content/{id}"),
            name: id.to_string(),
            ancestors: vec![],
            content: "Mountain bicycles".to_string(),
            language: language.to_string(),
            version,
            is_latest_version: true,
            fields: [("category".to_string(), "sports".to_string())]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn creates_new_index() {
        let temp = TempDir::new().unwrap();
        let writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        assert!(temp.path().join("meta.json").exists());
        drop(writer);
    }

    #[test]
    fn adds_and_commits_documents() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        writer
            .add_documents(&[doc("a", "en", 1), doc("b", "en", 1)])
            .unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 2);
    }

    #[test]
    fn same_version_replaces_earlier_copy() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        writer.add_document(&doc("a", "en", 1)).unwrap();
        writer.commit().unwrap();
        // Language spelling differs but normalizes to the same key
        writer.add_document(&doc("a", "EN", 1)).unwrap();
        writer.add_document(&doc("a", "en", 2)).unwrap();
        writer.add_document(&doc("a", "da", 1)).unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 3);
    }

    #[test]
    fn blank_id_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        let err = writer.add_document(&doc("  ", "en", 1)).unwrap_err();
        assert!(matches!(err, IndexError::Write(_)));
    }

    #[test]
    fn reopens_existing_index() {
        let temp = TempDir::new().unwrap();
        {
            let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();
            writer.add_document(&doc("a", "en", 1)).unwrap();
            writer.commit().unwrap();
        }
        let writer = IndexWriter::open(temp.path(), Language::English).unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }

    #[test]
    fn delete_all_removes_documents() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        writer.add_document(&doc("a", "en", 1)).unwrap();
        writer.commit().unwrap();
        writer.delete_all().unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn rollback_discards_uncommitted_changes() {
        let temp = TempDir::new().unwrap();
        let mut writer = IndexWriter::open(temp.path(), Language::English).unwrap();

        writer.add_document(&doc("a", "en", 1)).unwrap();
        writer.rollback().unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 0);
    }
}
