use crate::cache::Caches;
use crate::client::QuoteSource;
use crate::commands::helpers::saved_for_marking;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{index_quotes, SearchQuery, SearchResult};
use crate::search::{search, SearchPolicy};
use crate::store::QuoteStore;
use tracing::{debug, warn};

pub fn run<Q: QuoteSource, S: QuoteStore>(
    source: &Q,
    store: &S,
    caches: &mut Caches,
    policy: &SearchPolicy,
    query: &SearchQuery,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let found = match caches.searches.get(query) {
        Some(cached) => {
            debug!(term = %query.content_term, author = %query.author, "search from cache");
            cached
        }
        None => match search(source, query, policy) {
            Ok(found) => {
                caches.searches.insert(query.clone(), found.clone());
                found
            }
            Err(e) => {
                warn!(error = %e, "search aborted");
                result.add_message(CmdMessage::error(format!("Error searching quotes: {}", e)));
                SearchResult::empty()
            }
        },
    };

    if result.has_errors() {
        return Ok(result);
    }
    if found.quotes.is_empty() {
        result.add_message(CmdMessage::info("No quotes found matching your criteria."));
        return Ok(result);
    }

    result.add_message(CmdMessage::info(summary(query, &found)));
    result.add_message(CmdMessage::info(caption(query, &found, policy)));

    let saved = saved_for_marking(store, caches, &mut result);
    result.truncated = found.truncated;
    Ok(result.with_listed_quotes(index_quotes(found.quotes, &saved)))
}

fn summary(query: &SearchQuery, found: &SearchResult) -> String {
    let n = found.total_matched;
    match (query.author.author(), query.has_content_term()) {
        (Some(author), true) => format!(
            "Showing {} quotes by {} containing '{}'",
            n, author, query.content_term
        ),
        (Some(author), false) => format!("Showing {} quotes by {}", n, author),
        (None, true) => format!("Found {} quotes containing '{}'", n, query.content_term),
        (None, false) => format!("Showing {} quotes", n),
    }
}

fn caption(query: &SearchQuery, found: &SearchResult, policy: &SearchPolicy) -> String {
    if found.truncated {
        format!(
            "(Showing the first {} matches. Try a more specific search term for better results)",
            policy.result_cap
        )
    } else if found.total_matched > policy.result_cap {
        format!("(Showing all {} matching quotes)", found.total_matched)
    } else if query.author.is_restricted() {
        format!(
            "(Search shows up to {} results at a time)",
            policy.result_cap
        )
    } else {
        format!("(Showing all {} matching quotes)", found.total_matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::fixtures::pages;
    use crate::client::memory::InMemorySource;
    use crate::client::QuotePage;
    use crate::model::{AuthorFilter, Quote, SavedQuote};
    use crate::store::memory::InMemoryStore;
    use std::time::Duration;

    fn session() -> Caches {
        Caches::new(Duration::from_secs(3600), Duration::from_secs(60))
    }

    fn mock_search_results() -> Vec<QuotePage> {
        vec![QuotePage::new(
            1,
            vec![
                Quote::new("1", "First test quote about experience", "Author 1"),
                Quote::new("2", "Second quote by same author", "Author 1"),
            ],
        )]
    }

    #[test]
    fn content_filter_over_all_authors() {
        let source = InMemorySource::new().with_pages(None, mock_search_results());
        let store = InMemoryStore::new();
        let query = SearchQuery::new("experience", AuthorFilter::All);

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        assert_eq!(result.listed_quotes.len(), 1);
        assert!(result.listed_quotes[0]
            .quote
            .content
            .to_lowercase()
            .contains("experience"));
        assert!(!result.truncated);
        assert_eq!(result.messages[0].content, "Found 1 quotes containing 'experience'");
    }

    #[test]
    fn author_filter_lists_only_that_author() {
        let source = InMemorySource::new().with_pages(Some("Author 1"), mock_search_results());
        let store = InMemoryStore::new();
        let query = SearchQuery::new("", AuthorFilter::parse("Author 1"));

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        assert!(!result.listed_quotes.is_empty());
        assert!(result.listed_quotes.len() <= 10);
        assert!(result
            .listed_quotes
            .iter()
            .all(|dq| dq.quote.author == "Author 1"));
        assert_eq!(result.messages[0].content, "Showing 2 quotes by Author 1");
        assert_eq!(
            result.messages[1].content,
            "(Search shows up to 10 results at a time)"
        );
    }

    #[test]
    fn truncation_is_reported() {
        let source = InMemorySource::new().with_pages(Some("A"), pages(2, 50, "A"));
        let store = InMemoryStore::new();
        let query = SearchQuery::new("", AuthorFilter::parse("A"));

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        assert_eq!(result.listed_quotes.len(), 10);
        assert!(result.truncated);
        assert!(result.messages[1].content.starts_with("(Showing the first 10 matches."));
    }

    #[test]
    fn listing_marks_saved_quotes() {
        let source = InMemorySource::new().with_pages(None, mock_search_results());
        let store = InMemoryStore::new().with_records(vec![SavedQuote::new(
            "Second quote by same author",
            "Author 1",
        )]);
        let query = SearchQuery::new("quote", AuthorFilter::All);

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        let flags: Vec<bool> = result.listed_quotes.iter().map(|dq| dq.is_saved).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn no_match_is_informational() {
        let source = InMemorySource::new().with_pages(None, mock_search_results());
        let store = InMemoryStore::new();
        let query = SearchQuery::new("zebra", AuthorFilter::All);

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        assert!(result.listed_quotes.is_empty());
        assert!(!result.has_errors());
        assert_eq!(
            result.messages[0].content,
            "No quotes found matching your criteria."
        );
    }

    #[test]
    fn failure_yields_empty_listing_with_error() {
        let source = InMemorySource::new()
            .with_pages(None, pages(3, 5, "A"))
            .failing_on_page(2);
        let store = InMemoryStore::new();
        let query = SearchQuery::new("quote", AuthorFilter::All);

        let result = run(&source, &store, &mut session(), &SearchPolicy::default(), &query).unwrap();
        assert!(result.listed_quotes.is_empty());
        assert!(!result.truncated);
        assert!(result.has_errors());
        assert!(result.messages[0].content.starts_with("Error searching quotes:"));
    }

    #[test]
    fn repeated_query_is_served_from_cache() {
        let source = InMemorySource::new().with_pages(None, pages(2, 3, "A"));
        let store = InMemoryStore::new();
        let mut caches = session();
        let query = SearchQuery::new("quote", AuthorFilter::All);

        run(&source, &store, &mut caches, &SearchPolicy::default(), &query).unwrap();
        let again = run(&source, &store, &mut caches, &SearchPolicy::default(), &query).unwrap();
        assert_eq!(again.listed_quotes.len(), 6);
        assert_eq!(source.requested_pages(), vec![1, 2]);

        let other = SearchQuery::new("number 1 ", AuthorFilter::All);
        run(&source, &store, &mut caches, &SearchPolicy::default(), &other).unwrap();
        assert_eq!(source.requested_pages(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn failed_search_is_not_cached() {
        let source = InMemorySource::new().offline();
        let store = InMemoryStore::new();
        let mut caches = session();
        let query = SearchQuery::new("quote", AuthorFilter::All);

        run(&source, &store, &mut caches, &SearchPolicy::default(), &query).unwrap();
        run(&source, &store, &mut caches, &SearchPolicy::default(), &query).unwrap();
        assert_eq!(source.requested_pages(), vec![1, 1]);
        assert!(caches.searches.is_empty());
    }
}
