use crate::cache::Caches;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SavedQuote;
use crate::store::QuoteStore;
use tracing::{debug, warn};

/// Saved records, served from the session cache while fresh.
pub fn saved_quotes<S: QuoteStore>(store: &S, caches: &mut Caches) -> Result<Vec<SavedQuote>> {
    if let Some(records) = caches.saved.get(&()) {
        debug!(count = records.len(), "saved quotes from cache");
        return Ok(records);
    }
    let records = store.load()?;
    caches.saved.insert((), records.clone());
    Ok(records)
}

/// Saved records for marking listings. A store that cannot be read marks
/// nothing and leaves an error on `result`.
pub fn saved_for_marking<S: QuoteStore>(
    store: &S,
    caches: &mut Caches,
    result: &mut CmdResult,
) -> Vec<SavedQuote> {
    match saved_quotes(store, caches) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "could not read saved quotes");
            result.add_message(CmdMessage::error(format!("Error loading quotes: {}", e)));
            Vec::new()
        }
    }
}
