//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every quotez operation, whatever UI drives it.
//!
//! The facade:
//! - **Dispatches** to the matching command
//! - **Owns the session state**: the collaborators, the search policy and the
//!   memoization [`Caches`]
//! - **Normalizes inputs** (raw search text and author picker values into a
//!   [`SearchQuery`])
//!
//! It does no I/O of its own and formats nothing.
//!
//! `QuotezApi<S, Q>` is generic over the store and the quote source:
//! - Production: `QuotezApi<CsvStore, HttpQuoteClient>`
//! - Testing: `QuotezApi<InMemoryStore, InMemorySource>`

use crate::cache::Caches;
use crate::client::QuoteSource;
use crate::commands;
use crate::config::QuotezConfig;
use crate::error::Result;
use crate::model::{AuthorFilter, SearchQuery};
use crate::search::SearchPolicy;
use crate::store::QuoteStore;
use std::path::{Path, PathBuf};

/// The main API facade for quotez operations.
pub struct QuotezApi<S: QuoteStore, Q: QuoteSource> {
    store: S,
    source: Q,
    policy: SearchPolicy,
    caches: Caches,
    data_dir: PathBuf,
}

impl<S: QuoteStore, Q: QuoteSource> QuotezApi<S, Q> {
    pub fn new(store: S, source: Q, config: &QuotezConfig, data_dir: PathBuf) -> Self {
        Self {
            store,
            source,
            policy: config.search_policy(),
            caches: Caches::new(config.remote_ttl(), config.store_ttl()),
            data_dir,
        }
    }

    pub fn random_quote(&mut self) -> Result<commands::CmdResult> {
        commands::random::run(&self.source, &self.store, &mut self.caches)
    }

    pub fn authors(&mut self) -> Result<commands::CmdResult> {
        commands::authors::run(&self.source, &mut self.caches)
    }

    /// `author` takes the picker value as typed; blank or "All Authors" means no restriction.
    pub fn search(&mut self, term: &str, author: Option<&str>) -> Result<commands::CmdResult> {
        let query = SearchQuery::new(term.trim(), AuthorFilter::from(author.map(str::to_string)));
        self.search_query(&query)
    }

    pub fn search_query(&mut self, query: &SearchQuery) -> Result<commands::CmdResult> {
        commands::search::run(
            &self.source,
            &self.store,
            &mut self.caches,
            &self.policy,
            query,
        )
    }

    pub fn save_quote(&mut self, quote: &str, author: &str) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.store, &mut self.caches, quote, author)
    }

    pub fn saved_quotes(&mut self) -> Result<commands::CmdResult> {
        commands::saved::run(&self.store, &mut self.caches)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Drops every memoized lookup.
    pub fn refresh(&mut self) {
        self.caches.clear();
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::fixtures::pages;
    use crate::client::memory::InMemorySource;
    use crate::model::Quote;
    use crate::store::memory::InMemoryStore;

    fn api(source: InMemorySource) -> QuotezApi<InMemoryStore, InMemorySource> {
        QuotezApi::new(
            InMemoryStore::new(),
            source,
            &QuotezConfig::default(),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn search_normalizes_sentinel_and_whitespace() {
        let source = InMemorySource::new().with_pages(None, pages(3, 2, "A"));
        let mut api = api(source);

        let result = api.search("  ", Some("All Authors")).unwrap();
        assert_eq!(result.listed_quotes.len(), 2);
        assert_eq!(api.source.requested_pages(), vec![1]);
        assert!(api.source.requests()[0].author.is_none());
    }

    #[test]
    fn search_passes_author_through() {
        let source = InMemorySource::new().with_pages(Some("Author 1"), pages(1, 2, "Author 1"));
        let mut api = api(source);

        let result = api.search("", Some("Author 1")).unwrap();
        assert_eq!(result.listed_quotes.len(), 2);
        assert_eq!(
            api.source.requests()[0].author.as_deref(),
            Some("Author 1")
        );
    }

    #[test]
    fn policy_follows_config() {
        let mut config = QuotezConfig::default();
        config.author_page_cap = 2;
        let api = QuotezApi::new(
            InMemoryStore::new(),
            InMemorySource::new(),
            &config,
            std::env::temp_dir(),
        );
        assert_eq!(api.policy().author_page_cap, 2);
    }

    #[test]
    fn save_then_listing_shows_saved_marker() {
        let source = InMemorySource::new().with_random(Quote::new("9", "Keep me", "Someone"));
        let mut api = api(source);

        let first = api.random_quote().unwrap();
        assert!(!first.listed_quotes[0].is_saved);

        api.save_quote("Keep me", "Someone").unwrap();
        let second = api.random_quote().unwrap();
        assert!(second.listed_quotes[0].is_saved);

        let saved = api.saved_quotes().unwrap();
        assert_eq!(saved.saved_quotes.len(), 1);
    }

    #[test]
    fn refresh_forces_new_lookups() {
        let source = InMemorySource::new().with_authors(["A"]);
        let mut api = api(source);

        api.authors().unwrap();
        api.authors().unwrap();
        assert_eq!(api.source.author_calls(), 1);

        api.refresh();
        api.authors().unwrap();
        assert_eq!(api.source.author_calls(), 2);
    }
}
