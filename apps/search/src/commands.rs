//! CLI definition and the search command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use lilydocs_core::{SearchGroup, SearchReporter, SearchTerm, search};
use lilydocs_fetcher::HttpFetcher;
use lilydocs_shared::{
    AppConfig, Category, FetchConfig, LogFormat, SearchConfig, render_config, resolve_config,
};

/// Prompt shown by `--interactive`.
const PROMPT: &str = "Enter a string to search the documentation by: ";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Search through the LilyPond documentation online for a command.
#[derive(Parser)]
#[command(name = "lilydocs-search", version, long_about = None)]
pub(crate) struct Cli {
    /// The string to search for in the documentation.
    #[arg(required_unless_present_any = ["interactive", "print_config"])]
    pub search_string: Option<String>,

    /// Prompt for the search string instead of taking it as an argument.
    #[arg(short, long)]
    pub interactive: bool,

    /// Prepend a backslash (\) and end with a word boundary (the default).
    #[arg(short, long, default_value_t = true)]
    pub word: bool,

    /// Search for this string exactly (no backslash or word boundary).
    #[arg(short, long)]
    pub raw: bool,

    /// Print the URL each group of matches comes from (-v); repeat for more logging.
    #[arg(short = 'v', long = "verbosity", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Number of documents fetched at once (output order is unaffected).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Config file to use instead of ~/.lilydocs/lilydocs.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration (including flag overrides) and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

/// Write flag values over the file/default configuration.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(concurrency) = cli.concurrency {
        config.search.concurrency = concurrency.max(1);
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the search and print grouped results as they arrive.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let mut app_config = resolve_config(cli.config.as_deref())?;
    apply_overrides(&cli, &mut app_config);

    if cli.print_config {
        print!("{}", render_config(&app_config)?);
        return Ok(());
    }

    let config = SearchConfig::try_from(&app_config)?;

    let search_string = match (cli.interactive, cli.search_string) {
        (true, _) => prompt_search_string(std::io::stdin().lock(), std::io::stdout())?,
        (false, Some(s)) => s,
        (false, None) => String::new(),
    };

    let raw = cli.raw || !cli.word;
    let term = SearchTerm::new(search_string, raw)?;
    let verbose = cli.verbosity > 0;

    if verbose {
        println!("Search term: {}", term.pattern());
    }

    let fetcher = HttpFetcher::new(&FetchConfig::from(&app_config))?;
    let reporter = CliReporter::new(verbose);

    let result = search(&config, &term, &fetcher, &reporter).await;
    reporter.finish();
    result?;

    Ok(())
}

/// Show [`PROMPT`] and read one line, without its line ending.
fn prompt_search_string(mut input: impl BufRead, mut output: impl Write) -> Result<String> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn category_header(category: Category) -> String {
    format!("*** Searching {category}...")
}

fn group_header(group: &SearchGroup, verbose: bool) -> String {
    if verbose {
        format!("--- {} ({})", group.key.version, group.url)
    } else {
        format!("--- {}", group.key.version)
    }
}

/// Prints results to stdout while a spinner on stderr shows progress.
struct CliReporter {
    spinner: ProgressBar,
    verbose: bool,
}

impl CliReporter {
    fn new(verbose: bool) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid progress template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner, verbose }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl SearchReporter for CliReporter {
    fn category_started(&self, category: Category) {
        self.spinner.set_message(format!("Fetching {category} documents"));
        self.spinner.suspend(|| println!("{}", category_header(category)));
    }

    fn group_found(&self, group: &SearchGroup) {
        self.spinner.suspend(|| {
            println!("{}", group_header(group, self.verbose));
            for line in &group.lines {
                println!("{line}");
            }
        });
    }
}
