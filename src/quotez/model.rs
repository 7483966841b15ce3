use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Sentinel the author picker uses for "no author restriction".
pub const ALL_AUTHORS: &str = "All Authors";

/// `date_saved` column format.
pub const SAVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A quote as served by the remote API.
///
/// The remote id is kept for display keys only. Two quotes are the same quote
/// when their content and author match, whatever ids they were served under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub content: String,
    pub author: String,
}

impl Quote {
    pub fn new(id: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn same_as(&self, saved: &SavedQuote) -> bool {
        saved.matches(&self.content, &self.author)
    }
}

/// A row of the saved quotes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuote {
    pub quote: String,
    pub author: String,
    pub date_saved: String,
}

impl SavedQuote {
    /// Stamps the record with the current local time.
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
            date_saved: Local::now().format(SAVED_AT_FORMAT).to_string(),
        }
    }

    pub fn matches(&self, quote: &str, author: &str) -> bool {
        self.quote == quote && self.author == author
    }

    /// Parses `date_saved`, if it is in the format we write.
    pub fn saved_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date_saved, SAVED_AT_FORMAT).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AuthorFilter {
    #[default]
    All,
    Author(String),
}

impl AuthorFilter {
    /// Blank input and the "All Authors" sentinel mean no restriction.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_AUTHORS) {
            AuthorFilter::All
        } else {
            AuthorFilter::Author(trimmed.to_string())
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            AuthorFilter::All => None,
            AuthorFilter::Author(name) => Some(name),
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, AuthorFilter::Author(_))
    }
}

impl From<Option<String>> for AuthorFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(AuthorFilter::All, |name| AuthorFilter::parse(&name))
    }
}

impl std::fmt::Display for AuthorFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorFilter::All => write!(f, "{}", ALL_AUTHORS),
            AuthorFilter::Author(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    /// Case-insensitive substring; empty means no content filter.
    pub content_term: String,
    pub author: AuthorFilter,
}

impl SearchQuery {
    pub fn new(content_term: impl Into<String>, author: AuthorFilter) -> Self {
        Self {
            content_term: content_term.into(),
            author,
        }
    }

    pub fn has_content_term(&self) -> bool {
        !self.content_term.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Number of quotes in `quotes`, not the upstream total.
    pub total_matched: usize,
    pub quotes: Vec<Quote>,
    /// Set when more quotes matched than were returned.
    pub truncated: bool,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A quote as listed to the user: numbered, and flagged when already saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayQuote {
    pub index: usize,
    pub quote: Quote,
    pub is_saved: bool,
}

/// Numbers quotes from 1 in the given order and marks the ones present in `saved`.
pub fn index_quotes(quotes: Vec<Quote>, saved: &[SavedQuote]) -> Vec<DisplayQuote> {
    quotes
        .into_iter()
        .enumerate()
        .map(|(i, quote)| {
            let is_saved = saved.iter().any(|s| quote.same_as(s));
            DisplayQuote {
                index: i + 1,
                quote,
                is_saved,
            }
        })
        .collect()
}
