//! Filesystem seam for cleanup runs
//!
//! The cleaner only lists directories and removes entries. Both go through
//! `TreeFs` so runs can be pointed at the local disk or at a wrapper.

pub mod local;
pub mod types;

pub use local::LocalFs;
pub use types::*;
