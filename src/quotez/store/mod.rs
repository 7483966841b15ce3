//! # Storage Layer
//!
//! Saved quotes live behind the [`QuoteStore`] trait so commands can be tested
//! without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::CsvStore`]: Production flat-file storage
//!   - One CSV file with the columns `quote,author,date_saved`
//!   - A missing file is an empty store
//!   - Records are appended, never rewritten
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! ## Uniqueness
//!
//! The store never holds two records with the same `(quote, author)` pair.
//! [`QuoteStore::append`] enforces this: saving a pair that is already present
//! writes nothing and returns `Ok(false)`. That is an outcome, not an error.

use crate::error::Result;
use crate::model::SavedQuote;
use tracing::debug;

pub mod fs;
pub mod memory;

/// Abstract interface for saved quote storage.
pub trait QuoteStore {
    /// All saved records, oldest first
    fn load(&self) -> Result<Vec<SavedQuote>>;

    /// Persist one record unconditionally
    fn push(&mut self, record: &SavedQuote) -> Result<()>;

    fn contains(&self, quote: &str, author: &str) -> Result<bool> {
        Ok(self.load()?.iter().any(|r| r.matches(quote, author)))
    }

    /// Save `(quote, author)` unless it is already stored.
    ///
    /// Returns `true` when a record was written.
    fn append(&mut self, quote: &str, author: &str) -> Result<bool> {
        if self.contains(quote, author)? {
            debug!(author, "quote already saved");
            return Ok(false);
        }
        self.push(&SavedQuote::new(quote, author))?;
        debug!(author, "quote saved");
        Ok(true)
    }
}
