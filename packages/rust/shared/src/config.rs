//! Application configuration for lilydocs.
//!
//! User config lives at `~/.lilydocs/lilydocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LilyDocsError, Result};
use crate::types::{Category, DocumentKey, VersionLabel};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "lilydocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".lilydocs";

/// Placeholder substituted with a version label in URL templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

// ---------------------------------------------------------------------------
// Config structs (matching lilydocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Keyword-gap checker settings.
    #[serde(default)]
    pub words: WordsConfig,

    /// Documentation search settings.
    #[serde(default)]
    pub search: SearchSection,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// `[words]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    /// Documentation index compared against the registry file.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Path to the local keyword registry (python-ly's `ly/words.py`).
    #[serde(default = "default_words_path")]
    pub words_path: PathBuf,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            words_path: default_words_path(),
        }
    }
}

fn default_index_url() -> String {
    "https://lilypond.org/doc/v2.23/Documentation/notation/lilypond-index".into()
}
fn default_words_path() -> PathBuf {
    PathBuf::from("ly/words.py")
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    /// Version labels to search, newest first.
    #[serde(default = "default_versions")]
    pub versions: Vec<VersionLabel>,

    /// How many documents may be fetched at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-category URL templates.
    #[serde(default)]
    pub urls: UrlTemplates,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            versions: default_versions(),
            concurrency: default_concurrency(),
            urls: UrlTemplates::default(),
        }
    }
}

fn default_versions() -> Vec<VersionLabel> {
    ["v2.25", "v2.24", "v2.22", "v2.20", "v2.18", "v2.16", "v2.14"]
        .into_iter()
        .filter_map(|v| VersionLabel::new(v).ok())
        .collect()
}
fn default_concurrency() -> usize {
    1
}

/// `[search.urls]` section: one template per category, each containing `{version}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlTemplates {
    #[serde(default = "default_changes_url")]
    pub changes: String,
    #[serde(default = "default_functions_url")]
    pub functions: String,
    #[serde(default = "default_commands_url")]
    pub commands: String,
    #[serde(default = "default_index_template")]
    pub index: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            changes: default_changes_url(),
            functions: default_functions_url(),
            commands: default_commands_url(),
            index: default_index_template(),
        }
    }
}

impl UrlTemplates {
    /// The template for a category.
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Changes => &self.changes,
            Category::Functions => &self.functions,
            Category::Commands => &self.commands,
            Category::Index => &self.index,
        }
    }
}

fn default_changes_url() -> String {
    "https://lilypond.org/doc/{version}/Documentation/changes/index#top".into()
}
fn default_functions_url() -> String {
    "https://lilypond.org/doc/{version}/Documentation/notation/available-music-functions".into()
}
fn default_commands_url() -> String {
    "https://lilypond.org/doc/{version}/Documentation/notation/lilypond-command-index".into()
}
fn default_index_template() -> String {
    "https://lilypond.org/doc/{version}/Documentation/notation/lilypond-index".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("lilydocs/", env!("CARGO_PKG_VERSION")).into()
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for the keyword-gap checker.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Documentation index to scan for commands.
    pub index_url: Url,
    /// Local keyword registry file.
    pub words_path: PathBuf,
}

impl TryFrom<&AppConfig> for CheckConfig {
    type Error = LilyDocsError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            index_url: parse_url(&config.words.index_url)?,
            words_path: config.words.words_path.clone(),
        })
    }
}

/// Runtime configuration for documentation searches.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Version labels to search, newest first.
    pub versions: Vec<VersionLabel>,
    /// Per-category URL templates.
    pub urls: UrlTemplates,
    /// Maximum concurrent fetches (at least 1).
    pub concurrency: usize,
}

impl TryFrom<&AppConfig> for SearchConfig {
    type Error = LilyDocsError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let versions = config.search.versions.clone();
        if versions.is_empty() {
            return Err(LilyDocsError::config("search.versions must not be empty"));
        }

        for category in Category::ALL {
            let template = config.search.urls.get(category);
            if !template.contains(VERSION_PLACEHOLDER) {
                return Err(LilyDocsError::config(format!(
                    "search.urls.{category} must contain {VERSION_PLACEHOLDER}: {template}"
                )));
            }
        }

        Ok(Self {
            versions,
            urls: config.search.urls.clone(),
            concurrency: config.search.concurrency.max(1),
        })
    }
}

impl SearchConfig {
    /// Every document to search, categories outermost, versions newest first.
    pub fn document_keys(&self) -> Vec<DocumentKey> {
        Category::ALL
            .into_iter()
            .flat_map(|category| {
                self.versions
                    .iter()
                    .map(move |version| DocumentKey::new(category, version.clone()))
            })
            .collect()
    }

    /// Resolve the address of one document.
    pub fn url_for(&self, key: &DocumentKey) -> Result<Url> {
        let template = self.urls.get(key.category);
        parse_url(&template.replace(VERSION_PLACEHOLDER, key.version.as_str()))
    }
}

/// Runtime configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http.timeout_secs,
            user_agent: config.http.user_agent.clone(),
        }
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| LilyDocsError::config(format!("invalid URL '{raw}': {e}")))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.lilydocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LilyDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.lilydocs/lilydocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using defaults");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LilyDocsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LilyDocsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Load from `explicit` when given (must exist), otherwise from the default location.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

/// Render a config as pretty TOML (for `--print-config`).
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| LilyDocsError::config(e.to_string()))
}
