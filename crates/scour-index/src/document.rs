//! Content documents as ingested into an index.
//!
//! Documents arrive as JSON lines, one object per line:
//!
//! ```json
//! {"id": "{6A1E...}", "path": "/content/home/bikes", "ancestors": ["{11...}"],
//!  "content": "Road bicycles", "language": "en", "fields": {"category": "sports"}}
//! ```

use std::{collections::BTreeMap, io::BufRead};

use serde::{Deserialize, Serialize};

use crate::IndexError;

/// A versioned content item ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Item identifier.
    pub id: String,
    /// Content path of the item.
    pub path: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Ids of every ancestor, nearest last.
    #[serde(default)]
    pub ancestors: Vec<String>,
    /// Free-text content.
    #[serde(default)]
    pub content: String,
    /// Language of this item version.
    pub language: String,
    /// Version number.
    #[serde(default = "first_version")]
    pub version: u64,
    /// Whether this is the most recent version in its language.
    #[serde(default = "latest_by_default")]
    pub is_latest_version: bool,
    /// Additional named fields.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Serde default for [`ContentDocument::version`].
fn first_version() -> u64 {
    1
}

/// Serde default for [`ContentDocument::is_latest_version`].
fn latest_by_default() -> bool {
    true
}

/// Reads JSON-lines documents, skipping blank lines.
pub fn read_documents(reader: impl BufRead) -> Result<Vec<ContentDocument>, IndexError> {
    let mut docs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc = serde_json::from_str(&line).map_err(|e| IndexError::Document {
            line: idx + 1,
            message: e.to_string(),
        })?;
        docs.push(doc);
    }
    Ok(docs)
}
