use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quotez", bin_name = "quotez", version)]
#[command(about = "Fetch, search and keep quotations from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show a random quote
    #[command(alias = "r", display_order = 1)]
    Random {
        /// Save the quote after showing it
        #[arg(short, long)]
        save: bool,
    },

    /// Search quotes by content and/or author
    #[command(alias = "s", display_order = 2)]
    Search {
        /// Words the quote must contain (joined with spaces, case-insensitive)
        #[arg(num_args = 0..)]
        term: Vec<String>,

        /// Only quotes by this author ("All Authors" for no restriction)
        #[arg(short, long)]
        author: Option<String>,

        /// Save listed quotes by number (e.g. --save 1 3)
        #[arg(long, num_args = 1.., value_name = "N")]
        save: Vec<usize>,
    },

    /// List saved quotes
    #[command(alias = "ls", display_order = 3)]
    Saved,

    /// List author names
    #[command(display_order = 4)]
    Authors {
        /// Only names containing this text
        filter: Option<String>,
    },

    /// Start an interactive session
    #[command(display_order = 5)]
    Shell,

    /// Get or set configuration
    #[command(display_order = 6)]
    Config {
        /// Configuration key (e.g., author-page-cap)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
