use super::QuoteStore;
use crate::error::{QuotezError, Result};
use crate::model::SavedQuote;
use std::cell::Cell;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<SavedQuote>,
    read_only: bool,
    loads: Cell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: Vec<SavedQuote>) -> Self {
        self.records = records;
        self
    }

    /// Every write fails, as on a read-only filesystem.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Number of `load` calls so far.
    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl QuoteStore for InMemoryStore {
    fn load(&self) -> Result<Vec<SavedQuote>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.records.clone())
    }

    fn push(&mut self, record: &SavedQuote) -> Result<()> {
        if self.read_only {
            return Err(QuotezError::Persistence(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.records.push(record.clone());
        Ok(())
    }
}
