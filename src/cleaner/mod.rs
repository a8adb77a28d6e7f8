//! Cleaner module - parallel removal of orphaned `.bak` files
//!
//! Walks a directory tree as nested fork/join tasks: one `DirectoryTask` per
//! directory and one `BackupFileBatch` per group of sibling files. Backups
//! with no matching original are removed, and directories left empty are
//! removed bottom-up in the same pass.

pub mod batch;
pub mod directory;
pub mod naming;
pub mod observer;
pub mod scheduler;
pub mod stats;
pub mod tree;

pub use batch::BackupFileBatch;
pub use directory::DirectoryTask;
pub use observer::{
    CleanupEvent, CleanupObserver, DeletionCause, Fanout, NoopObserver, SharedObserver,
    TracingObserver,
};
pub use scheduler::{fork_join, CleanupTask, Scheduler, SchedulerConfig};
pub use stats::{CleanupStats, StatsSnapshot};
pub use tree::{CleanupReport, TreeCleaner};
