//! Interactive session.
//!
//! The shell keeps one `QuotezApi` alive across commands so the memoized
//! author list and searches are reused, and remembers the last listing so
//! `save <n>` can refer to it.

use super::commands::{handle_authors, handle_random, handle_saved, handle_search, save_listed};
use super::print::print_messages;
use colored::Colorize;
use quotez::api::{CmdMessage, QuotezApi};
use quotez::client::QuoteSource;
use quotez::error::Result;
use quotez::model::DisplayQuote;
use quotez::store::QuoteStore;
use std::io::{BufRead, ErrorKind, Write};

const PROMPT: &str = "quotez> ";

const HELP: &str = "\
Commands:
  random                      show a random quote
  search <words> [@ <author>] search quotes by content, optionally by one author
  author <name>               list quotes by one author
  authors [filter]            list author names
  save <n> [<n>...]           save quotes from the last listing by number
  saved                       list saved quotes
  refresh                     forget memoized lookups
  help                        show this help
  quit                        leave the shell";

#[derive(Debug, PartialEq, Eq)]
pub(super) enum ShellCommand {
    Random,
    Search { term: String, author: Option<String> },
    Authors { filter: Option<String> },
    Save(Vec<usize>),
    Saved,
    Refresh,
    Help,
    Quit,
    Empty,
}

pub(super) fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "random" | "r" => Ok(ShellCommand::Random),
        "search" | "s" => {
            let (term, author) = match rest.split_once('@') {
                Some((term, author)) => (term.trim(), Some(author.trim().to_string())),
                None => (rest, None),
            };
            Ok(ShellCommand::Search {
                term: term.to_string(),
                author,
            })
        }
        "author" | "by" => {
            if rest.is_empty() {
                return Err("Usage: author <name>".to_string());
            }
            Ok(ShellCommand::Search {
                term: String::new(),
                author: Some(rest.to_string()),
            })
        }
        "authors" => Ok(ShellCommand::Authors {
            filter: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "save" => {
            let numbers = rest
                .split_whitespace()
                .map(|n| n.parse::<usize>().map_err(|_| format!("Not a quote number: {}", n)))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if numbers.is_empty() {
                return Err("Usage: save <n> [<n>...]".to_string());
            }
            Ok(ShellCommand::Save(numbers))
        }
        "saved" | "ls" => Ok(ShellCommand::Saved),
        "refresh" => Ok(ShellCommand::Refresh),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command: {} (type 'help')", other)),
    }
}

pub(super) fn run<S: QuoteStore, Q: QuoteSource>(api: &mut QuotezApi<S, Q>) -> Result<()> {
    run_with(api, std::io::stdin().lock())
}

fn run_with<S, Q, R>(api: &mut QuotezApi<S, Q>, mut input: R) -> Result<()>
where
    S: QuoteStore,
    Q: QuoteSource,
    R: BufRead,
{
    let mut stdout = std::io::stdout();
    let mut listing: Vec<DisplayQuote> = Vec::new();

    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());

    loop {
        print!("{}", PROMPT.cyan());
        stdout.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!();
                return Ok(());
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                print_messages(&[CmdMessage::error("Input is not valid UTF-8; line ignored.")]);
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                print_messages(&[CmdMessage::error(e)]);
                continue;
            }
        };

        match command {
            ShellCommand::Random => listing = handle_random(api, false)?,
            ShellCommand::Search { term, author } => {
                listing = handle_search(api, &term, author.as_deref(), &[])?
            }
            ShellCommand::Authors { filter } => handle_authors(api, filter)?,
            ShellCommand::Save(numbers) => save_listed(api, &listing, &numbers)?,
            ShellCommand::Saved => handle_saved(api)?,
            ShellCommand::Refresh => {
                api.refresh();
                print_messages(&[CmdMessage::success("Caches cleared.")]);
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Empty => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotez::client::memory::InMemorySource;
    use quotez::config::QuotezConfig;
    use quotez::model::Quote;
    use quotez::store::memory::InMemoryStore;
    use std::io::Cursor;

    fn session() -> QuotezApi<InMemoryStore, InMemorySource> {
        let source = InMemorySource::new().with_random(Quote::new("1", "Keep going.", "Someone"));
        QuotezApi::new(
            InMemoryStore::new(),
            source,
            &QuotezConfig::default(),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut api = session();
        let mut input = b"random\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"save 1\nquit\n");

        run_with(&mut api, Cursor::new(input)).unwrap();
        assert_eq!(api.saved_quotes().unwrap().saved_quotes.len(), 1);
    }

    #[test]
    fn end_of_input_leaves_the_shell() {
        let mut api = session();
        run_with(&mut api, Cursor::new(b"random\n".to_vec())).unwrap();
        assert!(api.saved_quotes().unwrap().saved_quotes.is_empty());
    }

    #[test]
    fn search_with_author_after_at_sign() {
        assert_eq!(
            parse_line("search be yourself @ Oscar Wilde").unwrap(),
            ShellCommand::Search {
                term: "be yourself".into(),
                author: Some("Oscar Wilde".into()),
            }
        );
        assert_eq!(
            parse_line("s life").unwrap(),
            ShellCommand::Search {
                term: "life".into(),
                author: None,
            }
        );
    }

    #[test]
    fn bare_search_lists_first_page() {
        assert_eq!(
            parse_line("search").unwrap(),
            ShellCommand::Search {
                term: String::new(),
                author: None,
            }
        );
    }

    #[test]
    fn author_shortcut() {
        assert_eq!(
            parse_line("author  Albert Einstein ").unwrap(),
            ShellCommand::Search {
                term: String::new(),
                author: Some("Albert Einstein".into()),
            }
        );
        assert!(parse_line("author").is_err());
    }

    #[test]
    fn save_takes_numbers() {
        assert_eq!(parse_line("save 1 3").unwrap(), ShellCommand::Save(vec![1, 3]));
        assert!(parse_line("save").is_err());
        assert_eq!(
            parse_line("save one").unwrap_err(),
            "Not a quote number: one"
        );
    }

    #[test]
    fn simple_words() {
        assert_eq!(parse_line("  ").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("RANDOM").unwrap(), ShellCommand::Random);
        assert_eq!(parse_line("saved").unwrap(), ShellCommand::Saved);
        assert_eq!(parse_line("authors").unwrap(), ShellCommand::Authors { filter: None });
        assert_eq!(
            parse_line("authors ein").unwrap(),
            ShellCommand::Authors {
                filter: Some("ein".into())
            }
        );
        assert_eq!(parse_line("exit").unwrap(), ShellCommand::Quit);
        assert!(parse_line("dance").is_err());
    }
}
