//! Root item resolution.

use scour_index::{IndexProvider, ItemId, ItemKey};
use tracing::warn;

/// Maps a root-scope string (id or path) to an item id.
pub trait ItemResolver {
    /// Returns the id of the item, or `None` if it cannot be found.
    fn resolve(&self, key: &str) -> Option<ItemId>;
}

/// Resolves items by looking them up in an index.
pub struct IndexItemResolver<'a> {
    /// Provider to open the lookup index through.
    provider: &'a dyn IndexProvider,
    /// Index to look items up in.
    index: String,
}

impl<'a> IndexItemResolver<'a> {
    /// Creates a resolver that looks items up in `index`.
    pub fn new(provider: &'a dyn IndexProvider, index: impl Into<String>) -> Self {
        Self {
            provider,
            index: index.into(),
        }
    }
}

impl ItemResolver for IndexItemResolver<'_> {
    fn resolve(&self, key: &str) -> Option<ItemId> {
        let key = ItemKey::parse(key)?;
        let found = self
            .provider
            .open_context(&self.index)
            .and_then(|context| context.find_item(&key));
        match found {
            Ok(id) => id,
            Err(e) => {
                warn!(index = %self.index, error = %e, "root item lookup failed");
                None
            }
        }
    }
}
