use crate::clock::SystemClock;
use crate::navigator::Navigator;
use crate::registry::StatusRegistry;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "project-status-admin",
    version,
    about = "Manage project statuses (create, rename, retire) from the terminal"
)]
pub struct Cli {
    /// Print the catalog as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print the catalog as a text table and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// How long notification banners stay visible
    #[arg(long, default_value = "5s")]
    pub banner_duration: humantime::Duration,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file (the TUI never logs to the terminal)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    fn is_interactive(&self) -> bool {
        cfg!(feature = "tui") && !self.json && !self.text
    }
}

/// Install the tracing subscriber for the chosen mode.
pub fn init_logging(args: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("invalid log filter {:?}", args.log_level))?;

    if let Some(path) = args.log_file.as_deref() {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if !args.is_interactive() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Build the session controller over the seeded catalog.
pub fn build_navigator(args: &Cli) -> Navigator {
    let registry = StatusRegistry::seeded(Box::new(SystemClock));
    Navigator::new(registry, args.banner_duration.into())
}

pub fn run(args: Cli) -> Result<()> {
    if args.json && args.text {
        return Err(anyhow::anyhow!("--json and --text cannot be used together"));
    }

    if args.is_interactive() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args);
        }
    }

    let navigator = build_navigator(&args);
    if args.json {
        return run_json(&navigator);
    }
    run_text(&navigator)
}

fn run_json(navigator: &Navigator) -> Result<()> {
    let out = serde_json::to_string_pretty(&navigator.registry().snapshot())
        .context("serialize catalog")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{out}").context("write JSON output")?;
    Ok(())
}

fn run_text(navigator: &Navigator) -> Result<()> {
    let summary = crate::text_summary::build_text_summary(navigator.registry())?;
    let mut stdout = std::io::stdout().lock();
    for line in summary.lines {
        writeln!(stdout, "{line}").context("write text output")?;
    }
    Ok(())
}
