use crate::cache::Caches;
use crate::commands::helpers::saved_quotes;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::QuoteStore;
use tracing::warn;

pub fn run<S: QuoteStore>(store: &S, caches: &mut Caches) -> Result<CmdResult> {
    match saved_quotes(store, caches) {
        Ok(records) => Ok(CmdResult::default().with_saved_quotes(records)),
        Err(e) => {
            warn!(error = %e, "could not read saved quotes");
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::error(format!("Error loading quotes: {}", e)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SavedQuote;
    use crate::store::fs::CsvStore;
    use crate::store::memory::InMemoryStore;
    use std::time::Duration;

    #[test]
    fn lists_saved_in_file_order() {
        let store = InMemoryStore::new().with_records(vec![
            SavedQuote::new("one", "A"),
            SavedQuote::new("two", "B"),
        ]);
        let result = run(&store, &mut Caches::disabled()).unwrap();
        let quotes: Vec<_> = result.saved_quotes.iter().map(|r| r.quote.as_str()).collect();
        assert_eq!(quotes, vec!["one", "two"]);
    }

    #[test]
    fn absent_file_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("quotes.csv"));

        let result = run(&store, &mut Caches::disabled()).unwrap();
        assert!(result.saved_quotes.is_empty());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn unreadable_file_becomes_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        std::fs::write(&path, "quote,author,date_saved\nbroken\n").unwrap();

        let result = run(&CsvStore::new(&path), &mut Caches::disabled()).unwrap();
        assert!(result.saved_quotes.is_empty());
        assert!(result.messages[0].content.starts_with("Error loading quotes:"));
    }

    #[test]
    fn reads_are_memoized() {
        let store = InMemoryStore::new().with_records(vec![SavedQuote::new("one", "A")]);
        let mut caches = Caches::new(Duration::from_secs(3600), Duration::from_secs(60));

        run(&store, &mut caches).unwrap();
        run(&store, &mut caches).unwrap();
        assert_eq!(store.loads(), 1);
    }
}
