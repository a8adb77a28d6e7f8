//! Diagnostics channel for cleanup runs.
//!
//! Tasks report what they do as `CleanupEvent`s to an injected
//! `CleanupObserver`. No cleanup decision depends on an observer; the
//! default one discards everything.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace, warn};

/// Why a deletion did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionCause {
    /// The directory was not empty when removal was attempted.
    /// Expected under concurrent writers; not an error.
    NotEmpty,
    /// The filesystem refused the removal
    Io { kind: io::ErrorKind, message: String },
}

impl DeletionCause {
    pub fn is_benign(&self) -> bool {
        matches!(self, DeletionCause::NotEmpty)
    }
}

impl From<&io::Error> for DeletionCause {
    fn from(err: &io::Error) -> Self {
        DeletionCause::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for DeletionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionCause::NotEmpty => write!(f, "directory not empty"),
            DeletionCause::Io { message, .. } => write!(f, "{}", message),
        }
    }
}

/// Structured event emitted during a cleanup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupEvent {
    /// A directory task began processing
    TaskStarted { path: PathBuf },
    /// An orphaned backup file was removed
    FileDeleted { path: PathBuf },
    /// A directory was removed after everything in it was eliminated
    DirectoryDeleted { path: PathBuf },
    /// A file or directory removal did not happen
    DeletionFailed { path: PathBuf, cause: DeletionCause },
    /// A directory could not be listed
    ListingFailed { path: PathBuf, cause: String },
}

impl CleanupEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::TaskStarted { path } => path,
            Self::FileDeleted { path } => path,
            Self::DirectoryDeleted { path } => path,
            Self::DeletionFailed { path, .. } => path,
            Self::ListingFailed { path, .. } => path,
        }
    }
}

/// Sink for cleanup events. Called concurrently from pool threads.
pub trait CleanupObserver: Send + Sync {
    fn on_event(&self, event: &CleanupEvent);
}

/// Shared handle threaded through task constructors
pub type SharedObserver = Arc<dyn CleanupObserver>;

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CleanupObserver for NoopObserver {
    fn on_event(&self, _event: &CleanupEvent) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CleanupObserver for TracingObserver {
    fn on_event(&self, event: &CleanupEvent) {
        match event {
            CleanupEvent::TaskStarted { path } => {
                trace!(path = %path.display(), "Processing directory");
            }
            CleanupEvent::FileDeleted { path } => {
                debug!(path = %path.display(), "Deleted backup file");
            }
            CleanupEvent::DirectoryDeleted { path } => {
                debug!(path = %path.display(), "Deleted directory");
            }
            CleanupEvent::DeletionFailed { path, cause } if cause.is_benign() => {
                debug!(path = %path.display(), cause = %cause, "Directory kept");
            }
            CleanupEvent::DeletionFailed { path, cause } => {
                warn!(path = %path.display(), error = %cause, "Deletion failed");
            }
            CleanupEvent::ListingFailed { path, cause } => {
                warn!(path = %path.display(), error = %cause, "Cannot read directory");
            }
        }
    }
}

/// Observer that broadcasts every event to several observers
#[derive(Default, Clone)]
pub struct Fanout {
    observers: Vec<SharedObserver>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: SharedObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl CleanupObserver for Fanout {
    fn on_event(&self, event: &CleanupEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
