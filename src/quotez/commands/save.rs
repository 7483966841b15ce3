use crate::cache::Caches;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SavedQuote;
use crate::store::QuoteStore;
use tracing::warn;

pub fn run<S: QuoteStore>(
    store: &mut S,
    caches: &mut Caches,
    quote: &str,
    author: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.append(quote, author) {
        Ok(true) => {
            caches.saved.clear();
            result.add_message(CmdMessage::success("Quote saved successfully!"));
            let record = store
                .load()
                .ok()
                .and_then(|records| records.into_iter().rev().find(|r| r.matches(quote, author)))
                .unwrap_or_else(|| SavedQuote::new(quote, author));
            Ok(result.with_affected_quotes(vec![record]))
        }
        Ok(false) => {
            result.add_message(CmdMessage::warning("This quote is already saved!"));
            Ok(result)
        }
        Err(e) => {
            warn!(error = %e, "saving quote failed");
            result.add_message(CmdMessage::error(format!("Error saving quote: {}", e)));
            Ok(result)
        }
    }
}
