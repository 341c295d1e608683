//! The search request translator.
//!
//! Translation happens in two steps. [`SearchTranslator::resolve`] turns the loose argument
//! bag into a [`SearchRequest`], applying defaults and rejecting malformed input before any
//! index is touched. [`SearchTranslator::execute`] opens a scoped context on the requested
//! index, folds the request onto an empty query, runs it once and wraps the results.

use scour_config::Config;
use scour_index::{IndexProvider, LanguageCode};
use tracing::debug;

use crate::{
    SearchError,
    args::SearchArgs,
    page::SearchResultPage,
    request::{ConnectionArgs, SearchRequest, facet_on, fields_equal},
    resolver::ItemResolver,
};

/// Ambient state of the caller issuing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Current content database.
    pub database: String,
    /// Language of the calling context, if it has one.
    pub context_language: Option<String>,
}

impl RequestContext {
    /// Builds a context from configured settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            database: config.settings.database.clone(),
            context_language: config.settings.context_language.clone(),
        }
    }

    /// The index a bag targets: its non-blank `index`, else the current database's index.
    pub fn index_name(&self, args: &SearchArgs, config: &Config) -> String {
        non_blank(args.index.as_deref())
            .map_or_else(|| config.index_name_for(&self.database), str::to_string)
    }
}

/// Translates search arguments into index queries.
pub struct SearchTranslator<'a> {
    /// Opens index contexts by name.
    provider: &'a dyn IndexProvider,
    /// Resolves the root scope.
    resolver: &'a dyn ItemResolver,
    /// Default language and index naming.
    config: &'a Config,
}

impl<'a> SearchTranslator<'a> {
    /// Creates a translator.
    pub fn new(
        provider: &'a dyn IndexProvider,
        resolver: &'a dyn ItemResolver,
        config: &'a Config,
    ) -> Self {
        Self {
            provider,
            resolver,
            config,
        }
    }

    /// Resolves and executes a request.
    pub fn search(
        &self,
        args: &SearchArgs,
        context: &RequestContext,
    ) -> Result<SearchResultPage, SearchError> {
        let request = self.resolve(args, context)?;
        self.execute(&request)
    }

    /// Resolves an argument bag into a request.
    ///
    /// Malformed `fieldsEqual` entries, blank facet names and non-numeric paging arguments
    /// fail here. An unresolvable root or unparseable language silently drops that filter.
    pub fn resolve(
        &self,
        args: &SearchArgs,
        context: &RequestContext,
    ) -> Result<SearchRequest, SearchError> {
        let fields_equal = fields_equal(&args.fields_equal)?;
        let facet_on = facet_on(&args.facet_on)?;
        let paging = ConnectionArgs::from_args(args)?;

        let root = non_blank(args.root_item.as_deref()).and_then(|key| {
            let id = self.resolver.resolve(key);
            if id.is_none() {
                debug!(root = key, "root item not found, searching everywhere");
            }
            id
        });

        Ok(SearchRequest {
            root,
            keyword: non_blank(args.keyword.as_deref()).map(str::to_string),
            language: self.language(args, context),
            latest_version: args.latest_version.unwrap_or(true),
            index: context.index_name(args, self.config),
            fields_equal,
            facet_on,
            paging,
        })
    }

    /// Runs a resolved request against its index.
    pub fn execute(&self, request: &SearchRequest) -> Result<SearchResultPage, SearchError> {
        let context = self.provider.open_context(&request.index)?;
        let query = request.apply(context.queryable());
        let results = context.execute(&query)?;
        Ok(SearchResultPage::new(results, request.paging.offset()))
    }

    /// Picks the request language: explicit argument, then context, then default.
    fn language(&self, args: &SearchArgs, context: &RequestContext) -> Option<LanguageCode> {
        let name = non_blank(args.language.as_deref())
            .or_else(|| non_blank(context.context_language.as_deref()))
            .unwrap_or(self.config.settings.default_language.as_str());

        match name.parse::<LanguageCode>() {
            Ok(code) => Some(code),
            Err(e) => {
                debug!(error = %e, "ignoring language filter");
                None
            }
        }
    }
}

/// Treats blank strings as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
