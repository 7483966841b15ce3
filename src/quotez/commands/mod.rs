//! # Command Layer
//!
//! One module per user action. Commands take the collaborators they need
//! (a [`QuoteSource`](crate::client::QuoteSource), a
//! [`QuoteStore`](crate::store::QuoteStore), the session [`Caches`](crate::cache::Caches))
//! and return a [`CmdResult`].
//!
//! Failures of the collaborators (network, protocol, file) stop here: the
//! command returns an empty result carrying an error message instead of an
//! `Err`. Only configuration problems surface as `Err`.

use crate::config::QuotezConfig;
use crate::model::{DisplayQuote, SavedQuote};

pub mod authors;
pub mod config;
pub mod helpers;
pub mod random;
pub mod save;
pub mod saved;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Quotes fetched from the service, numbered for display
    pub listed_quotes: Vec<DisplayQuote>,
    /// Set when a search returned fewer quotes than matched
    pub truncated: bool,
    pub saved_quotes: Vec<SavedQuote>,
    /// Records written by this command
    pub affected_quotes: Vec<SavedQuote>,
    pub authors: Vec<String>,
    pub config: Option<QuotezConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_quotes(mut self, quotes: Vec<DisplayQuote>) -> Self {
        self.listed_quotes = quotes;
        self
    }

    pub fn with_saved_quotes(mut self, quotes: Vec<SavedQuote>) -> Self {
        self.saved_quotes = quotes;
        self
    }

    pub fn with_affected_quotes(mut self, quotes: Vec<SavedQuote>) -> Self {
        self.affected_quotes = quotes;
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_config(mut self, config: QuotezConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
