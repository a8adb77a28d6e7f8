//! Terminal progress and summary output for the CLI

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::fmt::MakeWriter;

use crate::cleaner::{CleanupEvent, CleanupObserver, CleanupReport, CleanupStats};

/// Spinner on stderr that shows running counts while a tree is cleaned
pub struct ProgressObserver {
    bar: ProgressBar,
    counts: CleanupStats,
}

impl ProgressObserver {
    /// Spinner drawn on stderr. indicatif hides it when stderr is not a terminal.
    pub fn new() -> Self {
        let observer = Self::with_bar(ProgressBar::new_spinner());
        observer.bar.enable_steady_tick(Duration::from_millis(120));
        observer
    }

    /// Observer drawing on an existing bar
    pub fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        Self {
            bar,
            counts: CleanupStats::new(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Log writer that clears the spinner while a line is written
    pub fn log_writer(&self) -> ProgressWriter {
        ProgressWriter {
            bar: self.bar.clone(),
        }
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }
}

/// stderr writer for `tracing-subscriber` that does not interleave with
/// the spinner
#[derive(Clone)]
pub struct ProgressWriter {
    bar: ProgressBar,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().lock().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.bar.suspend(|| io::stderr().lock().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanupObserver for ProgressObserver {
    fn on_event(&self, event: &CleanupEvent) {
        self.counts.on_event(event);
        let snapshot = self.counts.snapshot();
        self.bar.set_message(format!(
            "{} dirs scanned | {} files deleted | {} dirs deleted | {} errors",
            snapshot.dirs_listed(),
            snapshot.files_deleted,
            snapshot.dirs_deleted,
            snapshot.errors()
        ));
    }
}

/// Print the end-of-run summary to stdout
pub fn print_summary(report: &CleanupReport) {
    let stats = &report.stats;

    println!();
    if report.reclaimed {
        println!("{} {}", "Removed".green().bold(), report.root.display());
    } else {
        println!("{} {}", "Cleaned".cyan().bold(), report.root.display());
    }
    println!("Directories scanned: {}", stats.dirs_listed());
    println!("Backup files deleted: {}", stats.files_deleted.to_string().green());
    println!("Directories deleted: {}", stats.dirs_deleted.to_string().green());
    if stats.races > 0 {
        println!("Directories kept (changed during run): {}", stats.races);
    }
    if stats.errors() > 0 {
        println!(
            "Errors: {} (see warnings above)",
            stats.errors().to_string().red().bold()
        );
    }
    println!("Duration: {:.2}s", report.duration.as_secs_f64());
}
