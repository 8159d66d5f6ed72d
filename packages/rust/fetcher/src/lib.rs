//! Documentation fetching.
//!
//! This crate provides:
//! - [`DocumentSource`]: the seam between workflows and the network
//! - [`HttpFetcher`]: a `reqwest`-backed source (single attempt, no cache)
//! - [`load_document`]: fetch a page fully, then normalize it

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use lilydocs_normalizer::{NormalizedDocument, normalize};
use lilydocs_shared::{FetchConfig, LilyDocsError, Result};

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 5;

// ---------------------------------------------------------------------------
// DocumentSource
// ---------------------------------------------------------------------------

/// Anything that can return the raw markup behind a URL.
pub trait DocumentSource: Send + Sync {
    /// Fetch the body at `url`. Failures are reported once, never retried.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

/// Fetch `url` from `source` and flatten it into searchable text.
pub async fn load_document<S: DocumentSource>(source: &S, url: &Url) -> Result<NormalizedDocument> {
    let body = source.fetch(url).await?;
    Ok(normalize(&body))
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// Fetches documentation pages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LilyDocsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl DocumentSource for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("fetching document");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| LilyDocsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LilyDocsError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LilyDocsError::Network(format!("{url}: body read failed: {e}")))?;

        debug!(status = status.as_u16(), body_len = body.len(), "document fetched");
        Ok(body)
    }
}
