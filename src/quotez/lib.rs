//! # Quotez Architecture
//!
//! Quotez fetches quotations from a remote quote service, searches them by
//! content and author, and keeps the ones you like in a flat CSV file. The
//! library holds all of that; the binary is one UI client on top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, runs the shell         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns session caches and the search policy                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action                               │
//! │  - Turns collaborator failures into messages                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Sources (client/)           │ │  Storage (store/)          │
//! │  - QuoteSource trait         │ │  - QuoteStore trait        │
//! │  - HTTP, in-memory           │ │  - CSV file, in-memory     │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! The search engine ([`search`]) sits between the commands and the quote
//! source: it walks the paged listing endpoint, filters on content and bounds
//! the result.
//!
//! ## Failures
//!
//! Network, protocol and file failures never end the program. Commands catch
//! them and return an empty result with an error message; the CLI prints the
//! message and carries on. Saving a quote that is already saved is a normal
//! outcome reported as a warning.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each action
//! - [`search`]: Pagination and filtering over the quote service
//! - [`client`]: Quote service abstraction and implementations
//! - [`store`]: Saved quote storage
//! - [`cache`]: Time-bounded memoization
//! - [`model`]: Core data types (`Quote`, `SavedQuote`, `SearchQuery`, `SearchResult`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod store;
