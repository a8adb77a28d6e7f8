use std::fs;
use std::io;
use std::path::Path;

use crate::fs::types::{EntryKind, FsEntry, RemoveOutcome, TreeFs};

/// `TreeFs` backed by the local filesystem.
///
/// Entry kinds come from the directory entry itself, so symbolic links are
/// never followed. A link to a directory is treated as a file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl TreeFs for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // An unreadable type counts as a file so it still blocks removal
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => EntryKind::Directory,
                _ => EntryKind::File,
            };

            entries.push(FsEntry {
                path: entry.path(),
                kind,
            });
        }

        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> RemoveOutcome {
        RemoveOutcome::from_result(fs::remove_dir(path))
    }
}
