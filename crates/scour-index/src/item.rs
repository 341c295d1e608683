//! Item identifiers and content paths.
//!
//! Content items are addressed either by id or by path. Ids that look like GUIDs
//! (`{110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}`, with or without braces and hyphens) are
//! normalized to lowercase hyphenated form so every spelling indexes and matches the same
//! term. Other ids are kept as given, minus surrounding whitespace.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// A normalized content item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Normalizes a raw identifier. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(normalize_guid(trimmed).unwrap_or_else(|| trimmed.to_string())))
    }

    /// Returns the normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats GUID input (simple, hyphenated, braced or URN) as lowercase hyphenated.
fn normalize_guid(raw: &str) -> Option<String> {
    Uuid::try_parse(raw)
        .ok()
        .map(|uuid| uuid.hyphenated().to_string())
}

/// Normalizes a content path: lowercase, leading `/`, no trailing `/`.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/').to_lowercase();
    if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

/// A reference to an item by id or by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    /// Lookup by identifier.
    Id(ItemId),
    /// Lookup by normalized content path.
    Path(String),
}

impl ItemKey {
    /// Interprets user input as a path (leading `/`) or an id. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(Self::Path(normalize_path(trimmed)))
        } else {
            ItemId::new(trimmed).map(Self::Id)
        }
    }
}
