//! # Search Engine
//!
//! Turns a [`SearchQuery`] into a bounded [`SearchResult`] by walking the paged
//! listing endpoint of a [`QuoteSource`] and filtering on the client side.
//!
//! ## Page walk
//!
//! | author filter | content term | pages fetched                                  |
//! |---------------|--------------|------------------------------------------------|
//! | one author    | any          | up to `author_page_cap`                        |
//! | all authors   | non-empty    | every page, bounded by `unrestricted_page_cap` |
//! | all authors   | empty        | page 1 only                                    |
//!
//! Pages are fetched one after another starting at 1. `totalPages` is re-read
//! from every response and the latest value decides whether to continue.
//!
//! ## Filtering and bounding
//!
//! Items keep fetch order. A non-empty term keeps only items whose content
//! contains it, ignoring case. Author-scoped results are capped at
//! `result_cap` and flagged `truncated` when the cap cut something off;
//! all-authors results are returned whole.
//!
//! ## Failure
//!
//! Any failed page fetch aborts the walk. Pages already fetched are dropped and
//! the caller gets the error; nothing partial ever leaves [`search`].

use crate::client::{PageRequest, QuoteSource, MAX_CONTENT_LENGTH, PAGE_SIZE};
use crate::error::Result;
use crate::model::{Quote, SearchQuery, SearchResult};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    pub page_size: u32,
    pub max_length: u32,
    pub author_page_cap: u32,
    pub unrestricted_page_cap: u32,
    pub result_cap: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_length: MAX_CONTENT_LENGTH,
            author_page_cap: 5,
            unrestricted_page_cap: 100,
            result_cap: 10,
        }
    }
}

impl SearchPolicy {
    /// Most pages this query may fetch.
    pub fn page_limit(&self, query: &SearchQuery) -> u32 {
        if query.author.is_restricted() {
            self.author_page_cap
        } else if query.has_content_term() {
            self.unrestricted_page_cap
        } else {
            1
        }
    }
}

pub fn search<Q: QuoteSource + ?Sized>(
    source: &Q,
    query: &SearchQuery,
    policy: &SearchPolicy,
) -> Result<SearchResult> {
    let collected = collect_pages(source, query, policy)?;
    let matched = filter_by_content(collected, &query.content_term);

    let result = if query.author.is_restricted() {
        bound(matched, policy.result_cap)
    } else {
        SearchResult {
            total_matched: matched.len(),
            quotes: matched,
            truncated: false,
        }
    };

    debug!(
        term = %query.content_term,
        author = %query.author,
        returned = result.total_matched,
        truncated = result.truncated,
        "search finished"
    );
    Ok(result)
}

fn collect_pages<Q: QuoteSource + ?Sized>(
    source: &Q,
    query: &SearchQuery,
    policy: &SearchPolicy,
) -> Result<Vec<Quote>> {
    let limit = policy.page_limit(query);
    let author = query.author.author();

    let mut quotes = Vec::new();
    let mut page = 1;
    let mut total_pages = 1;

    while page <= total_pages && page <= limit {
        let request =
            PageRequest::new(page, author).with_sizes(policy.page_size, policy.max_length);
        let fetched = source.fetch_page(&request)?;
        debug!(
            page,
            total_pages = fetched.total_pages,
            items = fetched.results.len(),
            "fetched quote page"
        );

        quotes.extend(fetched.results);
        total_pages = fetched.total_pages;
        page += 1;
    }

    if !query.author.is_restricted() && query.has_content_term() && total_pages > limit {
        warn!(
            total_pages,
            limit, "stopped before the last page; raise unrestricted-page-cap to search further"
        );
    }

    Ok(quotes)
}

fn filter_by_content(quotes: Vec<Quote>, term: &str) -> Vec<Quote> {
    if term.is_empty() {
        return quotes;
    }
    let needle = term.to_lowercase();
    quotes
        .into_iter()
        .filter(|q| q.content.to_lowercase().contains(&needle))
        .collect()
}

fn bound(mut quotes: Vec<Quote>, cap: usize) -> SearchResult {
    let truncated = quotes.len() > cap;
    quotes.truncate(cap);
    SearchResult {
        total_matched: quotes.len(),
        quotes,
        truncated,
    }
}
