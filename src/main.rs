//! bakprune - removes orphaned `.bak` files and the directories they leave empty
//!
//! Entry point for the CLI application.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use bakprune::cleaner::{Fanout, TracingObserver};
use bakprune::progress::{print_summary, ProgressObserver, ProgressWriter};
use bakprune::{Scheduler, TreeCleaner};

/// Remove `.bak` files that have no original next to them, then remove
/// every directory left empty
#[derive(Parser, Debug)]
#[command(name = "bakprune", version, about)]
struct CliArgs {
    /// Root directory to clean
    #[arg(value_name = "basePath")]
    base_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    let Some(base_path) = args.base_path else {
        println!("Missing parameter basePath");
        println!("{}", CliArgs::command().render_usage());
        return Ok(());
    };

    let progress = Arc::new(ProgressObserver::new());
    setup_logging(progress.log_writer())?;

    let scheduler = Scheduler::with_defaults().context("Failed to start worker pool")?;

    let observer = Fanout::new()
        .with(Arc::new(TracingObserver))
        .with(progress.clone());

    let cleaner = TreeCleaner::new(scheduler).with_observer(Arc::new(observer));
    let report = cleaner.run_with_report(&base_path);

    progress.finish();
    print_summary(&report);

    Ok(())
}

/// Logs go to stderr around the spinner; `RUST_LOG` overrides the default
/// `warn` level
fn setup_logging(writer: ProgressWriter) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
