//! The inbound argument bag.
//!
//! [`SearchArgs`] mirrors the arguments of the GraphQL `search` field as they arrive in a
//! variables object:
//!
//! ```json
//! {
//!   "rootItem": "/sitecore/content/home",
//!   "keyword": "bicycle",
//!   "language": "en",
//!   "latestVersion": true,
//!   "index": "content_master_index",
//!   "fieldsEqual": [{"name": "category", "value": "sports"}],
//!   "facetOn": ["color"],
//!   "first": 10,
//!   "after": "20"
//! }
//! ```
//!
//! The bag is deliberately loose: `fieldsEqual` entries stay untyped JSON until resolution
//! so that a malformed entry is reported as a missing field rather than a decode error, and
//! paging cursors may be numbers or numeric strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::SearchError;

/// Arguments of one search request, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SearchArgs {
    /// Id or path of the item to search under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_item: Option<String>,
    /// Free-text keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Language code of the versions to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Restrict to latest versions. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<bool>,
    /// Index name. Defaults to the standard index of the current database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// `{name, value}` equality filters, ANDed.
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub fields_equal: Vec<Value>,
    /// Field names to facet on. A single string is treated as a one-element list.
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub facet_on: Vec<String>,
    /// Connection `first`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<CursorArg>,
    /// Connection `last`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<CursorArg>,
    /// Connection `before` cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<CursorArg>,
    /// Connection `after` cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<CursorArg>,
}

impl SearchArgs {
    /// Parses an argument bag from JSON. `null` and empty input mean "no arguments".
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let args: Option<Self> = serde_json::from_str(json)?;
        Ok(args.unwrap_or_default())
    }

    /// Adds a `{name, value}` entry to `fieldsEqual`. A `None` value leaves the key out.
    pub fn push_field(&mut self, name: &str, value: Option<&str>) {
        let mut entry = Map::new();
        entry.insert("name".to_string(), Value::from(name));
        if let Some(value) = value {
            entry.insert("value".to_string(), Value::from(value));
        }
        self.fields_equal.push(Value::Object(entry));
    }
}

/// An integer paging argument as given: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CursorArg {
    /// Numeric form.
    Number(Number),
    /// String form, as GraphQL `String` cursors arrive.
    Text(String),
}

impl CursorArg {
    /// Reads the argument as a non-negative integer.
    pub fn to_usize(&self, argument: &'static str) -> Result<usize, SearchError> {
        let parsed = match self {
            Self::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Self::Text(s) => s.trim().parse::<usize>().ok(),
        };
        parsed.ok_or_else(|| SearchError::InvalidCursor {
            argument,
            value: self.to_string(),
        })
    }
}

impl From<usize> for CursorArg {
    fn from(value: usize) -> Self {
        Self::Number(Number::from(value))
    }
}

impl fmt::Display for CursorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

/// Accepts `null` for a list argument.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string, a list of strings or `null`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    /// Either shape of the argument.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        /// A single name.
        One(String),
        /// A list of names.
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
    })
}
