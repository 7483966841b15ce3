//! # Quote Sources
//!
//! The remote quote service is reached through the [`QuoteSource`] trait so the
//! search engine and commands never depend on HTTP directly.
//!
//! ## Implementations
//!
//! - [`http::HttpQuoteClient`]: production client for the Quotable-style API
//!   - `GET /random` for a single quote
//!   - `GET /authors` for the author list
//!   - `GET /quotes?limit=&maxLength=&page=[&author=]` for paged listings
//!
//! - [`memory::InMemorySource`]: scripted pages for testing
//!   - Records every page request
//!   - Can be told to fail on a given page
//!
//! Every call is a single request: no retries, one fixed timeout.

use crate::error::Result;
use crate::model::Quote;
use serde::Deserialize;

pub mod http;
pub mod memory;

/// Items requested per page.
pub const PAGE_SIZE: u32 = 50;
/// Longest quote content requested from the service.
pub const MAX_CONTENT_LENGTH: u32 = 1000;

/// One request against the paged listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub author: Option<String>,
    pub limit: u32,
    pub max_length: u32,
}

impl PageRequest {
    pub fn new(page: u32, author: Option<&str>) -> Self {
        Self {
            page,
            author: author.map(str::to_string),
            limit: PAGE_SIZE,
            max_length: MAX_CONTENT_LENGTH,
        }
    }

    pub fn with_sizes(mut self, limit: u32, max_length: u32) -> Self {
        self.limit = limit;
        self.max_length = max_length;
        self
    }
}

/// One page of the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuotePage {
    #[serde(default)]
    pub results: Vec<Quote>,
    /// The service omits this on some responses; a single page is assumed then.
    #[serde(rename = "totalPages", default = "single_page")]
    pub total_pages: u32,
}

fn single_page() -> u32 {
    1
}

impl QuotePage {
    pub fn new(total_pages: u32, results: Vec<Quote>) -> Self {
        Self {
            results,
            total_pages,
        }
    }
}

/// Abstract interface to the remote quote service.
pub trait QuoteSource {
    /// Fetch one random quote
    fn random_quote(&self) -> Result<Quote>;

    /// Fetch the names of all known authors
    fn author_names(&self) -> Result<Vec<String>>;

    /// Fetch one page of the quote listing, optionally restricted to an author
    fn fetch_page(&self, request: &PageRequest) -> Result<QuotePage>;
}
