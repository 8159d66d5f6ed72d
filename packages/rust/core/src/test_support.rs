//! In-memory doubles shared by the workflow tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use lilydocs_fetcher::DocumentSource;
use lilydocs_shared::{AppConfig, Category, LilyDocsError, Result, SearchConfig, VersionLabel};

use crate::search::{SearchGroup, SearchReporter};

pub(crate) const TEST_HOST: &str = "https://docs.test";

/// A search config whose URLs look like `https://docs.test/<category>/<version>`.
pub(crate) fn search_config(versions: &[&str]) -> SearchConfig {
    let mut app = AppConfig::default();
    app.search.versions = versions
        .iter()
        .map(|v| VersionLabel::new(*v))
        .collect::<Result<_>>()
        .expect("valid test versions");
    app.search.urls.changes = format!("{TEST_HOST}/changes/{{version}}");
    app.search.urls.functions = format!("{TEST_HOST}/functions/{{version}}");
    app.search.urls.commands = format!("{TEST_HOST}/commands/{{version}}");
    app.search.urls.index = format!("{TEST_HOST}/index/{{version}}");
    SearchConfig::try_from(&app).expect("valid test config")
}

/// Serves canned pages by URL path; unknown paths fail like a 404.
#[derive(Debug, Default)]
pub(crate) struct StaticSource {
    pages: HashMap<String, (String, u64)>,
}

impl StaticSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(self, path: &str, body: &str) -> Self {
        self.delayed_page(path, body, 0)
    }

    pub(crate) fn delayed_page(mut self, path: &str, body: &str, delay_ms: u64) -> Self {
        self.pages
            .insert(path.to_string(), (body.to_string(), delay_ms));
        self
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let Some((body, delay_ms)) = self.pages.get(url.path()) else {
            return Err(LilyDocsError::Network(format!("{url}: HTTP 404 Not Found")));
        };
        if *delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
        }
        Ok(body.clone())
    }
}

/// Records reporter calls as readable strings.
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl SearchReporter for RecordingReporter {
    fn category_started(&self, category: Category) {
        self.events.borrow_mut().push(format!("category {category}"));
    }

    fn group_found(&self, group: &SearchGroup) {
        self.events
            .borrow_mut()
            .push(format!("group {}: {}", group.key, group.lines.join(" | ")));
    }
}
