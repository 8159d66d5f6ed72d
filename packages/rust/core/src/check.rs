//! Keyword-gap check: documented commands absent from the local registry.

use tracing::{info, instrument};

use lilydocs_fetcher::{DocumentSource, load_document};
use lilydocs_shared::{CheckConfig, Result};

use crate::keywords::extract_keywords;
use crate::missing::MissingDetector;

/// Outcome of a keyword-gap check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of distinct tokens read from the registry.
    pub known_keywords: usize,
    /// Untrimmed documentation lines with no registry counterpart, in document order.
    pub missing: Vec<String>,
}

/// Compare the documentation index against the registry file.
///
/// The registry is read first so a bad path fails before any network access.
#[instrument(skip_all, fields(url = %config.index_url, words_path = %config.words_path.display()))]
pub async fn check_words<S: DocumentSource>(config: &CheckConfig, source: &S) -> Result<CheckReport> {
    let keywords = extract_keywords(&config.words_path)?;
    let detector = MissingDetector::new(&keywords)?;

    let doc = load_document(source, &config.index_url).await?;
    let missing: Vec<String> = detector
        .find_missing(doc.lines())
        .map(String::from)
        .collect();

    info!(
        known_keywords = keywords.len(),
        missing = missing.len(),
        "keyword check completed"
    );

    Ok(CheckReport {
        known_keywords: keywords.len(),
        missing,
    })
}
