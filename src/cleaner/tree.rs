//! Entry point for a cleanup run over a whole tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::directory::DirectoryTask;
use super::observer::{Fanout, NoopObserver, SharedObserver};
use super::scheduler::Scheduler;
use super::stats::{CleanupStats, StatsSnapshot};
use crate::fs::{LocalFs, TreeFs};

/// Summary of one run
#[derive(Debug, Clone)]
pub struct CleanupReport {
    pub root: PathBuf,
    /// True when the root itself was removed
    pub reclaimed: bool,
    pub stats: StatsSnapshot,
    pub duration: Duration,
}

/// Submits a root [`DirectoryTask`] and waits for the whole tree.
///
/// A root that is missing or not a directory fails the root task; it does
/// not panic or return an error.
pub struct TreeCleaner {
    scheduler: Scheduler,
    fs: Arc<dyn TreeFs>,
    observer: SharedObserver,
}

impl TreeCleaner {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            fs: Arc::new(LocalFs),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn TreeFs>) -> Self {
        self.fs = fs;
        self
    }

    /// Clean the tree under `root`. True iff `root` itself was removed.
    pub fn run(&self, root: &Path) -> bool {
        self.run_observed(root, Arc::clone(&self.observer))
    }

    /// Like [`run`](Self::run), also counting what happened
    pub fn run_with_report(&self, root: &Path) -> CleanupReport {
        let start = Instant::now();
        let stats = Arc::new(CleanupStats::new());
        let observer = Fanout::new()
            .with(Arc::clone(&self.observer))
            .with(stats.clone());

        let reclaimed = self.run_observed(root, Arc::new(observer));

        CleanupReport {
            root: root.to_path_buf(),
            reclaimed,
            stats: stats.snapshot(),
            duration: start.elapsed(),
        }
    }

    fn run_observed(&self, root: &Path, observer: SharedObserver) -> bool {
        info!(
            root = %root.display(),
            threads = self.scheduler.threads(),
            "Starting cleanup"
        );
        let task = DirectoryTask::new(root, Arc::clone(&self.fs), observer);
        let reclaimed = self.scheduler.invoke(task);
        debug!(root = %root.display(), reclaimed, "Cleanup finished");
        reclaimed
    }
}
