//! Grouped documentation search across categories and versions.
//!
//! Documents are fetched category by category, newest version first. Fetches
//! may overlap (bounded by `SearchConfig::concurrency`), but results are
//! always reported in that fixed order. The first failing fetch aborts the
//! search; groups already reported stay reported.

use futures::StreamExt;
use regex::Regex;
use tracing::{debug, info, instrument};
use url::Url;

use lilydocs_fetcher::{DocumentSource, load_document};
use lilydocs_shared::{Category, DocumentKey, LilyDocsError, Result, SearchConfig};

// ---------------------------------------------------------------------------
// SearchTerm
// ---------------------------------------------------------------------------

/// A user-supplied search string and the matcher derived from it.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    text: String,
    raw: bool,
    matcher: Regex,
}

impl SearchTerm {
    /// Build a term.
    ///
    /// Raw terms match as a literal substring anywhere in a line. Otherwise
    /// the term is treated as a command: a leading backslash is added unless
    /// already present, and the match must end on a word boundary.
    pub fn new(text: impl Into<String>, raw: bool) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(LilyDocsError::validation("search string must not be empty"));
        }

        let pattern = if raw {
            regex::escape(&text)
        } else if text.starts_with('\\') {
            format!(r"{}\b", regex::escape(&text))
        } else {
            format!(r"\\{}\b", regex::escape(&text))
        };

        Ok(Self {
            matcher: Regex::new(&pattern)?,
            text,
            raw,
        })
    }

    /// The term as the user entered it.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// The effective pattern, for display.
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Whether the term occurs anywhere in `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    /// Matching lines of `text`, trimmed, in order.
    pub fn matching_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        lines
            .into_iter()
            .filter(|line| self.is_match(line))
            .map(|line| line.trim().to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Matches from one document.
#[derive(Debug, Clone)]
pub struct SearchGroup {
    pub key: DocumentKey,
    /// Resolved document address.
    pub url: Url,
    /// Matching lines, trimmed, in document order. Never empty.
    pub lines: Vec<String>,
}

/// Receives search results as they become available, in output order.
pub trait SearchReporter {
    /// Called once per category, before any of its groups.
    fn category_started(&self, category: Category);
    /// Called for every document with at least one match.
    fn group_found(&self, group: &SearchGroup);
}

/// No-op reporter for headless/test usage.
pub struct SilentReporter;

impl SearchReporter for SilentReporter {
    fn category_started(&self, _category: Category) {}
    fn group_found(&self, _group: &SearchGroup) {}
}

/// Totals for a finished search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub documents_searched: usize,
    pub groups: usize,
    pub lines_matched: usize,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Search every configured category and version for `term`.
#[instrument(skip_all, fields(term = %term.text(), raw = term.is_raw()))]
pub async fn search<S: DocumentSource>(
    config: &SearchConfig,
    term: &SearchTerm,
    source: &S,
    reporter: &dyn SearchReporter,
) -> Result<SearchSummary> {
    let keys = config.document_keys();

    info!(
        documents = keys.len(),
        concurrency = config.concurrency,
        pattern = term.pattern(),
        "starting search"
    );

    let fetches = keys.clone().into_iter().map(|key| async move {
        let url = config.url_for(&key)?;
        let doc = load_document(source, &url).await?;
        Ok::<_, LilyDocsError>((url, doc))
    });
    let mut fetched = futures::stream::iter(fetches).buffered(config.concurrency);

    let mut summary = SearchSummary::default();
    let mut current: Option<Category> = None;

    for key in keys {
        if current != Some(key.category) {
            reporter.category_started(key.category);
            current = Some(key.category);
        }

        let Some(result) = fetched.next().await else {
            break;
        };
        let (url, doc) = result?;
        summary.documents_searched += 1;

        let lines = term.matching_lines(doc.lines());
        debug!(document = %key, matches = lines.len(), "document searched");

        if lines.is_empty() {
            continue;
        }

        summary.groups += 1;
        summary.lines_matched += lines.len();
        reporter.group_found(&SearchGroup { key, url, lines });
    }

    info!(
        documents = summary.documents_searched,
        groups = summary.groups,
        lines = summary.lines_matched,
        "search completed"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingReporter, StaticSource, search_config};

    #[test]
    fn raw_term_is_a_literal_substring() {
        let term = SearchTerm::new("2.2", true).unwrap();
        assert!(term.is_match("New in 2.22: feature X"));
        assert!(!term.is_match("New in 232: feature X"));
        assert_eq!(term.pattern(), r"2\.2");
    }

    #[test]
    fn word_term_gets_backslash_and_boundary() {
        let term = SearchTerm::new("up", false).unwrap();
        assert_eq!(term.pattern(), r"\\up\b");
        assert!(term.is_match("\\up"));
        assert!(term.is_match("use \\up here"));
        assert!(!term.is_match("New in 2.22: feature X"));
        assert!(!term.is_match("up"));
        assert!(!term.is_match("\\upbow"));
    }

    #[test]
    fn existing_backslash_is_not_doubled() {
        let term = SearchTerm::new("\\slur", false).unwrap();
        assert_eq!(term.pattern(), r"\\slur\b");
        assert!(term.is_match("  \\slur:"));
        assert!(!term.is_match("\\slurDashed"));
    }

    #[test]
    fn metacharacters_in_terms_are_literal() {
        let term = SearchTerm::new("a+b", true).unwrap();
        assert!(term.is_match("x a+b y"));
        assert!(!term.is_match("aab"));
    }

    #[test]
    fn empty_term_is_rejected() {
        assert!(SearchTerm::new("", false).is_err());
        assert!(SearchTerm::new("   ", true).is_err());
    }

    #[test]
    fn matching_lines_are_trimmed_and_unanchored() {
        let term = SearchTerm::new("tweak", false).unwrap();
        let lines = ["  \\tweak\tone grob  ", "see also \\tweak.", "\\tweaks", "tweak"];
        assert_eq!(
            term.matching_lines(lines),
            ["\\tweak\tone grob", "see also \\tweak."]
        );
    }

    #[tokio::test]
    async fn groups_follow_category_then_version_order() {
        let config = search_config(&["v2.24", "v2.22", "v2.20"]);
        let source = StaticSource::new()
            .page("/changes/v2.22", "<p>\\slur changed</p>")
            .page("/changes/v2.24", "<p>nothing</p>")
            .page("/changes/v2.20", "<p>\\slur added</p>")
            .page("/functions/v2.24", "<p>\\slur</p>")
            .page("/functions/v2.22", "")
            .page("/functions/v2.20", "")
            .page("/commands/v2.24", "")
            .page("/commands/v2.22", "")
            .page("/commands/v2.20", "")
            .page("/index/v2.24", "<table><tr><td>\\slur</td><td>Slurs</td></tr></table>")
            .page("/index/v2.22", "")
            .page("/index/v2.20", "<p>\\slurred</p>");

        let term = SearchTerm::new("slur", false).unwrap();
        let reporter = RecordingReporter::default();
        let summary = search(&config, &term, &source, &reporter).await.unwrap();

        assert_eq!(
            reporter.events(),
            [
                "category changes",
                "group changes@v2.22: \\slur changed",
                "group changes@v2.20: \\slur added",
                "category functions",
                "group functions@v2.24: \\slur",
                "category commands",
                "category index",
                "group index@v2.24: \\slur\tSlurs",
            ]
        );
        assert_eq!(
            summary,
            SearchSummary {
                documents_searched: 12,
                groups: 4,
                lines_matched: 4,
            }
        );
    }

    #[tokio::test]
    async fn no_matches_still_searches_every_document() {
        let config = search_config(&["v2.24"]);
        let mut source = StaticSource::new();
        for category in Category::ALL {
            source = source.page(&format!("/{category}/v2.24"), "<p>\\slurred</p>");
        }

        let term = SearchTerm::new("slur", false).unwrap();
        let summary = search(&config, &term, &source, &SilentReporter).await.unwrap();

        assert_eq!(summary.documents_searched, 4);
        assert_eq!(summary.groups, 0);
    }

    #[tokio::test]
    async fn concurrent_fetches_keep_output_order() {
        let versions = ["v2.25", "v2.24", "v2.22", "v2.20", "v2.18", "v2.16", "v2.14"];
        let mut config = search_config(&versions);
        config.concurrency = 8;

        let mut source = StaticSource::new();
        for category in Category::ALL {
            for (i, version) in versions.iter().enumerate() {
                // Later documents answer first.
                let delay = (versions.len() - i) as u64 * 5;
                source = source.delayed_page(
                    &format!("/{category}/{version}"),
                    &format!("<p>\\once in {category} {version}</p>"),
                    delay,
                );
            }
        }

        let term = SearchTerm::new("once", false).unwrap();
        let reporter = RecordingReporter::default();
        search(&config, &term, &source, &reporter).await.unwrap();

        let mut expected = Vec::new();
        for category in Category::ALL {
            expected.push(format!("category {category}"));
            for version in versions {
                expected.push(format!(
                    "group {category}@{version}: \\once in {category} {version}"
                ));
            }
        }
        assert_eq!(reporter.events(), expected);
    }

    #[tokio::test]
    async fn fetch_failure_aborts_after_earlier_groups() {
        let config = search_config(&["v2.24", "v2.22"]);
        let source = StaticSource::new()
            .page("/changes/v2.24", "<p>\\slur</p>")
            .page("/changes/v2.22", "<p>\\slur</p>");
        // Nothing registered for functions: the fetch fails.

        let term = SearchTerm::new("slur", false).unwrap();
        let reporter = RecordingReporter::default();
        let err = search(&config, &term, &source, &reporter).await.unwrap_err();

        assert!(matches!(err, LilyDocsError::Network(_)));
        assert_eq!(
            reporter.events(),
            [
                "category changes",
                "group changes@v2.24: \\slur",
                "group changes@v2.22: \\slur",
                "category functions",
            ]
        );
    }

    #[tokio::test]
    async fn search_against_http_server() {
        use lilydocs_fetcher::HttpFetcher;
        use lilydocs_shared::{AppConfig, FetchConfig, VersionLabel};
        use wiremock::matchers::path_regex;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(path_regex(r"^/doc/v2\.24/index$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<p>New in 2.22: feature X</p>"),
            )
            .mount(&server)
            .await;
        Mock::given(path_regex(r"^/doc/v2\.24/(changes|functions|commands)$"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>unrelated</p>"))
            .mount(&server)
            .await;

        let mut app = AppConfig::default();
        app.search.versions = vec![VersionLabel::new("v2.24").unwrap()];
        app.search.urls.changes = format!("{}/doc/{{version}}/changes", server.uri());
        app.search.urls.functions = format!("{}/doc/{{version}}/functions", server.uri());
        app.search.urls.commands = format!("{}/doc/{{version}}/commands", server.uri());
        app.search.urls.index = format!("{}/doc/{{version}}/index", server.uri());
        let config = SearchConfig::try_from(&app).unwrap();

        let fetcher = HttpFetcher::new(&FetchConfig::from(&app)).unwrap();
        let term = SearchTerm::new("2.2", true).unwrap();
        let reporter = RecordingReporter::default();
        let summary = search(&config, &term, &fetcher, &reporter).await.unwrap();

        assert_eq!(summary.groups, 1);
        assert!(
            reporter
                .events()
                .contains(&"group index@v2.24: New in 2.22: feature X".to_string())
        );
    }
}
