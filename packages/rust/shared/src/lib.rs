//! Shared types, error model, and configuration for lilydocs.
//!
//! This crate is the foundation depended on by all other lilydocs crates.
//! It provides:
//! - [`LilyDocsError`]: the unified error type
//! - Domain types ([`Category`], [`VersionLabel`], [`DocumentKey`])
//! - Configuration ([`AppConfig`], the merged runtime configs, config loading)
//! - Tracing setup for the binaries ([`init_tracing`])

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CheckConfig, FetchConfig, HttpConfig, SearchConfig, SearchSection, UrlTemplates,
    VERSION_PLACEHOLDER, WordsConfig, config_dir, config_file_path, load_config,
    load_config_from, render_config, resolve_config,
};
pub use error::{LilyDocsError, Result};
pub use logging::{LogFormat, filter_directive, init_tracing};
pub use types::{Category, DocumentKey, VersionLabel};
