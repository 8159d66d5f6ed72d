//! Known-keyword extraction from a registry file.
//!
//! The registry is python-ly's `ly/words.py`: Python lists where every
//! keyword sits on its own line as `    'token',`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use lilydocs_shared::{LilyDocsError, Result};

/// Matches a line that starts with a quoted keyword followed by a comma.
static REGISTRY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*'([A-Za-z][-A-Za-z\d]*)',").expect("registry line regex")
});

/// The set of keyword tokens already known locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    tokens: BTreeSet<String>,
}

impl KeywordSet {
    /// Collect one token per matching registry line; other lines are skipped.
    pub fn from_registry_text(text: &str) -> Self {
        text.lines()
            .filter_map(|line| REGISTRY_LINE_RE.captures(line))
            .map(|caps| caps[1].to_string())
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read a registry file and extract its keyword tokens.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn extract_keywords(path: &Path) -> Result<KeywordSet> {
    let text = std::fs::read_to_string(path).map_err(|e| LilyDocsError::io(path, e))?;
    let keywords = KeywordSet::from_registry_text(&text);
    debug!(keywords = keywords.len(), "registry loaded");
    Ok(keywords)
}
