//! Core domain types for documentation lookups.

use serde::{Deserialize, Serialize};

use crate::error::{LilyDocsError, Result};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// One of the documentation sections that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Changes,
    Functions,
    Commands,
    Index,
}

impl Category {
    /// All categories, in the order search results are emitted.
    pub const ALL: [Category; 4] = [
        Category::Changes,
        Category::Functions,
        Category::Commands,
        Category::Index,
    ];

    /// Lowercase name used in headers and config keys.
    pub fn name(self) -> &'static str {
        match self {
            Category::Changes => "changes",
            Category::Functions => "functions",
            Category::Commands => "commands",
            Category::Index => "index",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// VersionLabel
// ---------------------------------------------------------------------------

/// A documented release, as it appears in documentation URLs (`v2.24`).
///
/// Deserialization goes through [`VersionLabel::new`], so labels read from a
/// config file are validated the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionLabel(String);

impl VersionLabel {
    /// Build a label, rejecting empty strings and embedded `/`.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(LilyDocsError::validation("version label must not be empty"));
        }
        if trimmed.contains('/') {
            return Err(LilyDocsError::validation(format!(
                "version label '{trimmed}' must not contain '/'"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VersionLabel {
    type Error = LilyDocsError;

    fn try_from(label: String) -> Result<Self> {
        Self::new(label)
    }
}

impl From<VersionLabel> for String {
    fn from(label: VersionLabel) -> Self {
        label.0
    }
}

impl std::fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// DocumentKey
// ---------------------------------------------------------------------------

/// Identifies one fetchable document: a category at a given version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub category: Category,
    pub version: VersionLabel,
}

impl DocumentKey {
    pub fn new(category: Category, version: VersionLabel) -> Self {
        Self { category, version }
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.category, self.version)
    }
}
