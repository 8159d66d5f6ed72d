//! CLI definition and the check command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use lilydocs_core::check_words;
use lilydocs_fetcher::HttpFetcher;
use lilydocs_shared::{
    AppConfig, CheckConfig, FetchConfig, LogFormat, render_config, resolve_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Compare python-ly's ly/words.py to the LilyPond online index.
#[derive(Parser)]
#[command(name = "lilydocs-words", version, long_about = None)]
pub(crate) struct Cli {
    /// URL of the LilyPond index document. If absent, the configured default is used.
    #[arg(short = 'u', long)]
    pub document_url: Option<String>,

    /// Path to your local python-ly/ly/words.py. If absent, the configured default is used.
    #[arg(short, long)]
    pub words_path: Option<PathBuf>,

    /// Config file to use instead of ~/.lilydocs/lilydocs.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration (including flag overrides) and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbosity", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Write flag values over the file/default configuration.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(url) = &cli.document_url {
        config.words.index_url = url.clone();
    }
    if let Some(path) = &cli.words_path {
        config.words.words_path = path.clone();
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the keyword-gap check and print one missing entry per line.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let mut app_config = resolve_config(cli.config.as_deref())?;
    apply_overrides(&cli, &mut app_config);

    if cli.print_config {
        print!("{}", render_config(&app_config)?);
        return Ok(());
    }

    let config = CheckConfig::try_from(&app_config)?;

    if cli.document_url.is_none() {
        eprintln!("Using LilyPond Doc : {}", config.index_url);
    }
    if cli.words_path.is_none() {
        eprintln!("Using words.py path: {}", config.words_path.display());
    }

    info!(url = %config.index_url, words_path = %config.words_path.display(), "checking keywords");

    let fetcher = HttpFetcher::new(&FetchConfig::from(&app_config))?;
    let report = check_words(&config, &fetcher).await?;

    for line in &report.missing {
        println!("{line}");
    }

    Ok(())
}
