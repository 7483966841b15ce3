//! # CLI Layer
//!
//! This module is **one possible UI client** for quotez, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin for the shell)
//! - Installs the logging subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API over the CSV store and HTTP client
//! - `handle_*()`: Per-command handlers that call the API and print the result.
//!   They are generic over the collaborators so the shell can reuse them.
//!
//! Collaborator failures arrive as error messages in a `CmdResult` and are
//! printed like any other message; only configuration problems end the process.

use super::print::{print_lines, print_messages, print_quotes, print_saved};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use quotez::api::{CmdMessage, ConfigAction, QuotezApi};
use quotez::client::http::HttpQuoteClient;
use quotez::client::QuoteSource;
use quotez::config::{data_dir, QuotezConfig, CONFIG_KEYS};
use quotez::error::Result;
use quotez::model::DisplayQuote;
use quotez::store::fs::CsvStore;
use quotez::store::QuoteStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: QuotezApi<CsvStore, HttpQuoteClient>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // `.env` may carry QUOTEZ_HOME or QUOTEZ_API_URL, so it loads before anything reads them.
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose);
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Random { save }) => handle_random(&mut ctx.api, save).map(|_| ()),
        Some(Commands::Search { term, author, save }) => {
            let term = term.join(" ");
            handle_search(&mut ctx.api, &term, author.as_deref(), &save).map(|_| ())
        }
        Some(Commands::Saved) => handle_saved(&mut ctx.api),
        Some(Commands::Authors { filter }) => handle_authors(&mut ctx.api, filter),
        Some(Commands::Shell) => shell::run(&mut ctx.api),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_random(&mut ctx.api, false).map(|_| ()),
    }
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(log_directives(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(log_directives(verbose, None)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `RUST_LOG` wins; otherwise errors only, or debug for quotez with `--verbose`.
fn log_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => directives.to_string(),
        None if verbose => "quotez=debug".to_string(),
        None => "error".to_string(),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = QuotezConfig::load(&data_dir)?.with_env_overrides();
    debug!(data_dir = %data_dir.display(), api_url = %config.api_url, "starting");

    let store = CsvStore::new(config.quotes_path(&data_dir));
    let source = HttpQuoteClient::from_config(&config)?;

    Ok(AppContext {
        api: QuotezApi::new(store, source, &config, data_dir),
    })
}

/// Shows one random quote; returns the listing so the shell can save from it.
pub(super) fn handle_random<S: QuoteStore, Q: QuoteSource>(
    api: &mut QuotezApi<S, Q>,
    save: bool,
) -> Result<Vec<DisplayQuote>> {
    let result = api.random_quote()?;
    print_quotes(&result.listed_quotes);
    print_messages(&result.messages);

    if save && !result.listed_quotes.is_empty() {
        save_listed(api, &result.listed_quotes, &[1])?;
    }
    Ok(result.listed_quotes)
}

pub(super) fn handle_search<S: QuoteStore, Q: QuoteSource>(
    api: &mut QuotezApi<S, Q>,
    term: &str,
    author: Option<&str>,
    save: &[usize],
) -> Result<Vec<DisplayQuote>> {
    let result = api.search(term, author)?;
    print_messages(&result.messages);
    if !result.listed_quotes.is_empty() {
        println!();
    }
    print_quotes(&result.listed_quotes);

    if !save.is_empty() {
        save_listed(api, &result.listed_quotes, save)?;
    }
    Ok(result.listed_quotes)
}

/// Saves quotes from `listing` by their displayed number.
pub(super) fn save_listed<S: QuoteStore, Q: QuoteSource>(
    api: &mut QuotezApi<S, Q>,
    listing: &[DisplayQuote],
    numbers: &[usize],
) -> Result<()> {
    if listing.is_empty() {
        print_messages(&[CmdMessage::error("Nothing listed to save from.")]);
        return Ok(());
    }

    for n in numbers {
        match listing.iter().find(|dq| dq.index == *n) {
            Some(dq) => {
                let result = api.save_quote(&dq.quote.content, &dq.quote.author)?;
                print_messages(&result.messages);
            }
            None => print_messages(&[CmdMessage::error(format!("No quote numbered {}", n))]),
        }
    }
    Ok(())
}

pub(super) fn handle_saved<S: QuoteStore, Q: QuoteSource>(
    api: &mut QuotezApi<S, Q>,
) -> Result<()> {
    let result = api.saved_quotes()?;
    if result.has_errors() {
        print_messages(&result.messages);
        return Ok(());
    }
    print_saved(&result.saved_quotes);
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_authors<S: QuoteStore, Q: QuoteSource>(
    api: &mut QuotezApi<S, Q>,
    filter: Option<String>,
) -> Result<()> {
    let result = api.authors()?;
    if result.has_errors() {
        print_messages(&result.messages);
        return Ok(());
    }

    let needle = filter.map(|f| f.to_lowercase());
    let names: Vec<String> = result
        .authors
        .into_iter()
        .filter(|name| match &needle {
            Some(needle) => name.to_lowercase().contains(needle),
            None => true,
        })
        .collect();
    print_lines(&names, "No authors found.");
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            let lines: Vec<String> = CONFIG_KEYS
                .iter()
                .filter_map(|k| config.get(k).map(|v| format!("{} = {}", k, v)))
                .collect();
            print_lines(&lines, "No configuration values.");
        }
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_verbose() {
        assert_eq!(log_directives(true, Some("quotez=trace")), "quotez=trace");
        assert_eq!(log_directives(false, Some("warn")), "warn");
    }

    #[test]
    fn verbose_and_default_levels() {
        assert_eq!(log_directives(true, None), "quotez=debug");
        assert_eq!(log_directives(false, None), "error");
        assert_eq!(log_directives(true, Some("  ")), "quotez=debug");
    }
}
