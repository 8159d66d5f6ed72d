//! Missing-keyword detection.
//!
//! A documentation line is a command entry when, after optional leading
//! whitespace, it starts with a backslash. The entry is known when the
//! backslash is immediately followed by some registry token and then a
//! Unicode word boundary: `\slur` covers `\slur up`, `\slur:` and
//! `\slur-up`, but not `\slurred` or `\slurDashed`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use lilydocs_shared::Result;

use crate::keywords::KeywordSet;

/// Compiled size budget for the known-keyword alternation (a full
/// registry holds a few thousand tokens).
const KNOWN_PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Matches a line whose first non-whitespace character is a backslash.
static COMMAND_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\\").expect("command line regex"));

/// Decides which documented commands have no registry counterpart.
#[derive(Debug, Clone)]
pub struct MissingDetector {
    /// `None` when the registry is empty: nothing is known.
    known: Option<Regex>,
}

impl MissingDetector {
    /// Compile the registry into a single anchored matcher.
    ///
    /// Tokens are escaped, so `-` and other metacharacters match literally.
    pub fn new(keywords: &KeywordSet) -> Result<Self> {
        if keywords.is_empty() {
            return Ok(Self { known: None });
        }

        let alternation = keywords
            .iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        let known = RegexBuilder::new(&format!(r"^\s*\\(?:{alternation})\b"))
            .size_limit(KNOWN_PATTERN_SIZE_LIMIT)
            .build()?;

        debug!(keywords = keywords.len(), "known-keyword matcher compiled");
        Ok(Self { known: Some(known) })
    }

    /// Whether the line is a command entry at all.
    pub fn is_command(line: &str) -> bool {
        COMMAND_LINE_RE.is_match(line)
    }

    /// Whether the line starts with a known command.
    pub fn is_known(&self, line: &str) -> bool {
        self.known.as_ref().is_some_and(|re| re.is_match(line))
    }

    /// Command lines with no known keyword, lazily and in input order.
    pub fn find_missing<'a, I>(&'a self, lines: I) -> impl Iterator<Item = &'a str> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        lines
            .into_iter()
            .filter(move |line| Self::is_command(line) && !self.is_known(line))
    }
}
