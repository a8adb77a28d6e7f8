use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry as reported by the listing itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of trying to remove a directory.
///
/// A directory that turned out to be non-empty is a normal outcome of
/// optimistic traversal and is kept apart from real I/O failures.
#[derive(Debug)]
pub enum RemoveOutcome {
    Removed,
    NotEmpty,
    Failed(io::Error),
}

impl RemoveOutcome {
    /// Classify the result of a `remove_dir` call
    pub fn from_result(result: io::Result<()>) -> Self {
        match result {
            Ok(()) => RemoveOutcome::Removed,
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => RemoveOutcome::NotEmpty,
            Err(e) => RemoveOutcome::Failed(e),
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed)
    }
}

/// Filesystem operations used by a cleanup run
pub trait TreeFs: Send + Sync {
    /// List the immediate children of `dir`
    fn list(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    /// Remove a single non-directory entry
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> RemoveOutcome;
}
