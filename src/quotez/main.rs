//! The quotez binary only invokes `cli::run()` and handles process termination.
//! Argument parsing, wiring and rendering live in `cli/`; everything the
//! commands do lives in the library.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
