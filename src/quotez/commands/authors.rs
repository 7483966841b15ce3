use crate::cache::Caches;
use crate::client::QuoteSource;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use tracing::{debug, warn};

pub fn run<Q: QuoteSource>(source: &Q, caches: &mut Caches) -> Result<CmdResult> {
    if let Some(names) = caches.authors.get(&()) {
        debug!(count = names.len(), "authors from cache");
        return Ok(CmdResult::default().with_authors(names));
    }

    match source.author_names() {
        Ok(names) => {
            caches.authors.insert((), names.clone());
            Ok(CmdResult::default().with_authors(names))
        }
        Err(e) => {
            warn!(error = %e, "author lookup failed");
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::error(format!("Error fetching authors: {}", e)));
            Ok(result)
        }
    }
}
