// Library module for bakprune
// Re-exports modules for use in integration tests and the binary

pub mod cleaner;
pub mod error;
pub mod fs;
pub mod progress;

pub use cleaner::{CleanupEvent, CleanupObserver, Scheduler, SchedulerConfig, TreeCleaner};
pub use error::CleanerError;
