//! Run statistics collected from cleanup events

use std::sync::atomic::{AtomicU64, Ordering};

use super::observer::{CleanupEvent, CleanupObserver};

/// Atomic counters updated from pool threads
#[derive(Debug, Default)]
pub struct CleanupStats {
    /// Directory tasks started, whether or not the path could be listed
    pub tasks_started: AtomicU64,

    /// Orphaned backup files removed
    pub files_deleted: AtomicU64,

    /// Directories removed
    pub dirs_deleted: AtomicU64,

    /// Removals refused by the filesystem
    pub deletion_failures: AtomicU64,

    /// Directories found non-empty at removal time
    pub races: AtomicU64,

    /// Directories that could not be listed
    pub listing_failures: AtomicU64,
}

/// Plain copy of the counters at one point in time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub tasks_started: u64,
    pub files_deleted: u64,
    pub dirs_deleted: u64,
    pub deletion_failures: u64,
    pub races: u64,
    pub listing_failures: u64,
}

impl StatsSnapshot {
    /// Directories that were actually listed
    pub fn dirs_listed(&self) -> u64 {
        self.tasks_started.saturating_sub(self.listing_failures)
    }

    /// Hard failures; benign races are not counted
    pub fn errors(&self) -> u64 {
        self.deletion_failures + self.listing_failures
    }
}

impl CleanupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tasks_started: self.tasks_started.load(Ordering::Relaxed),
            files_deleted: self.files_deleted.load(Ordering::Relaxed),
            dirs_deleted: self.dirs_deleted.load(Ordering::Relaxed),
            deletion_failures: self.deletion_failures.load(Ordering::Relaxed),
            races: self.races.load(Ordering::Relaxed),
            listing_failures: self.listing_failures.load(Ordering::Relaxed),
        }
    }
}

impl CleanupObserver for CleanupStats {
    fn on_event(&self, event: &CleanupEvent) {
        let counter = match event {
            CleanupEvent::TaskStarted { .. } => &self.tasks_started,
            CleanupEvent::FileDeleted { .. } => &self.files_deleted,
            CleanupEvent::DirectoryDeleted { .. } => &self.dirs_deleted,
            CleanupEvent::DeletionFailed { cause, .. } if cause.is_benign() => &self.races,
            CleanupEvent::DeletionFailed { .. } => &self.deletion_failures,
            CleanupEvent::ListingFailed { .. } => &self.listing_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
