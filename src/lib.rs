//! # sievelists - Domain Lists from Public Filter Lists
//!
//! Downloads ad, tracker and malware filter lists, extracts the domain names
//! they mention, and writes one sorted, deduplicated `<id>.txt` per source.
//! It runs as a batch job: every source is processed once, then it exits.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       sievelists                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: update, sources, verify, version          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Built-in registry of six sources, optional YAML     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── ListFetcher trait, lossy UTF-8, line splitting       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Extractors (regex)                                         │
//! │    ├── Generic: adblock filter syntax                       │
//! │    ├── HostsFile: "<address> <hostname>"                    │
//! │    └── UrlHost: bare hosts, IPs and URLs                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Pipeline                                                   │
//! │    └── fetch -> extract -> BTreeSet -> atomic file write    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use sievelists::config::Config;
//! use sievelists::fetcher::HttpFetcher;
//! use sievelists::pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let fetcher = HttpFetcher::new()?;
//!
//!     for report in pipeline::run(&config, &fetcher).await? {
//!         println!("{}: {} domains", report.id, report.domain_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Source registry and configuration
//! - [`error`] - Error taxonomy
//! - [`extractor`] - Line extractors and format selection
//! - [`fetcher`] - HTTP retrieval of source lists
//! - [`output`] - Domain list files
//! - [`pipeline`] - Per-source orchestration
//! - [`utils`] - Formatting helpers
//! - [`validation`] - IPv4 detection, identifier and URL checks

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod output;
pub mod pipeline;
pub mod utils;
pub mod validation;

pub use config::{Config, SourceDescriptor};
pub use error::SieveError;
pub use extractor::ListFormat;
