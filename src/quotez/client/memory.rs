use super::{PageRequest, QuotePage, QuoteSource};
use crate::error::{QuotezError, Result};
use crate::model::Quote;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Scripted quote source for testing and offline development.
///
/// Pages are registered per author (`None` for the unrestricted listing) and
/// served in order; each page keeps whatever `total_pages` it was scripted
/// with. Requests past the scripted pages get an empty page.
#[derive(Default)]
pub struct InMemorySource {
    random: Option<Quote>,
    authors: Vec<String>,
    pages: HashMap<Option<String>, Vec<QuotePage>>,
    failing_page: Option<u32>,
    offline: bool,
    requests: RefCell<Vec<PageRequest>>,
    random_calls: Cell<usize>,
    author_calls: Cell<usize>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_random(mut self, quote: Quote) -> Self {
        self.random = Some(quote);
        self
    }

    pub fn with_authors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pages(mut self, author: Option<&str>, pages: Vec<QuotePage>) -> Self {
        self.pages.insert(author.map(str::to_string), pages);
        self
    }

    /// Every request for this page number fails.
    pub fn failing_on_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    /// Every call fails.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.borrow().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|r| r.page).collect()
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.get()
    }

    pub fn author_calls(&self) -> usize {
        self.author_calls.get()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(QuotezError::Protocol("quote service unavailable".to_string()));
        }
        Ok(())
    }
}

impl QuoteSource for InMemorySource {
    fn random_quote(&self) -> Result<Quote> {
        self.random_calls.set(self.random_calls.get() + 1);
        self.check_online()?;
        self.random
            .clone()
            .ok_or_else(|| QuotezError::Protocol("no random quote scripted".to_string()))
    }

    fn author_names(&self) -> Result<Vec<String>> {
        self.author_calls.set(self.author_calls.get() + 1);
        self.check_online()?;
        Ok(self.authors.clone())
    }

    fn fetch_page(&self, request: &PageRequest) -> Result<QuotePage> {
        self.requests.borrow_mut().push(request.clone());
        self.check_online()?;
        if self.failing_page == Some(request.page) {
            return Err(QuotezError::Protocol(format!(
                "GET quotes page {} returned 500 Internal Server Error",
                request.page
            )));
        }

        let scripted = self.pages.get(&request.author);
        let page = scripted
            .and_then(|pages| pages.get(request.page.saturating_sub(1) as usize))
            .cloned()
            .unwrap_or_else(|| {
                let total = scripted.map_or(1, |pages| pages.len().max(1) as u32);
                QuotePage::new(total, Vec::new())
            });
        Ok(page)
    }
}

// --- Test Fixtures ---

pub mod fixtures {
    use super::*;

    /// A quote whose content and id are derived from `n`.
    pub fn quote(n: usize, author: &str) -> Quote {
        Quote::new(n.to_string(), format!("Quote number {} by {}", n, author), author)
    }

    /// `count` pages of `per_page` quotes each, all reporting `count` total pages.
    pub fn pages(count: u32, per_page: usize, author: &str) -> Vec<QuotePage> {
        (0..count as usize)
            .map(|p| {
                let quotes = (0..per_page)
                    .map(|i| quote(p * per_page + i + 1, author))
                    .collect();
                QuotePage::new(count, quotes)
            })
            .collect()
    }
}
