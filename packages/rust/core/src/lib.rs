//! Keyword bookkeeping and documentation search for lilydocs.
//!
//! This crate ties the fetcher and normalizer together into the two
//! end-to-end workflows:
//! - [`check::check_words`]: documentation commands missing from a registry
//! - [`search::search`]: grouped matches across categories and versions

pub mod check;
pub mod keywords;
pub mod missing;
pub mod search;

#[cfg(test)]
mod test_support;

pub use check::{CheckReport, check_words};
pub use keywords::{KeywordSet, extract_keywords};
pub use missing::MissingDetector;
pub use search::{SearchGroup, SearchReporter, SearchSummary, SearchTerm, SilentReporter, search};
