use crate::cache::Caches;
use crate::client::QuoteSource;
use crate::commands::helpers::saved_for_marking;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::index_quotes;
use crate::store::QuoteStore;
use tracing::warn;

pub fn run<Q: QuoteSource, S: QuoteStore>(
    source: &Q,
    store: &S,
    caches: &mut Caches,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let quote = match source.random_quote() {
        Ok(quote) => quote,
        Err(e) => {
            warn!(error = %e, "random quote lookup failed");
            result.add_message(CmdMessage::error(format!("Error fetching quote: {}", e)));
            return Ok(result);
        }
    };

    let saved = saved_for_marking(store, caches, &mut result);
    Ok(result.with_listed_quotes(index_quotes(vec![quote], &saved)))
}
