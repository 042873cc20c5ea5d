mod banner;
mod cli;
mod clock;
mod error;
mod model;
mod navigator;
mod registry;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;
mod validation;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(&args)?;
    cli::run(args)
}
