//! lilydocs-words: find LilyPond commands missing from python-ly's word list.
//!
//! Scans the online LilyPond index for entries that start with a backslash and
//! prints every one that has no counterpart in `ly/words.py`.

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
