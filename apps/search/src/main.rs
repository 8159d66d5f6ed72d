//! lilydocs-search: search the LilyPond documentation across releases.
//!
//! Looks for a command (or, with `--raw`, any string) in the changes,
//! music functions, command index and full index of several LilyPond
//! versions, printing matches grouped by category and version.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    lilydocs_shared::init_tracing(cli.log_format, cli.verbosity);
    commands::run(cli).await
}
