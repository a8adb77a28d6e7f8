//! Orphaned backup removal for one group of sibling files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::naming::{backup_stem, file_name_bytes, is_backup, original_keys};
use super::observer::{CleanupEvent, DeletionCause, SharedObserver};
use super::scheduler::CleanupTask;
use crate::fs::TreeFs;

/// Sibling files that share a partition key.
///
/// Every backup whose stem matches no original in the group is removed.
/// The group is fully reclaimed only when it holds no originals and every
/// removal succeeded.
pub struct BackupFileBatch {
    files: Vec<PathBuf>,
    fs: Arc<dyn TreeFs>,
    observer: SharedObserver,
}

impl BackupFileBatch {
    pub fn new(files: Vec<PathBuf>, fs: Arc<dyn TreeFs>, observer: SharedObserver) -> Self {
        Self { files, fs, observer }
    }

    pub fn process(&self) -> bool {
        let (backups, originals): (Vec<&PathBuf>, Vec<&PathBuf>) = self
            .files
            .iter()
            .partition(|path| is_backup(file_name_bytes(path)));

        let protected: HashSet<&[u8]> = originals
            .iter()
            .flat_map(|path| original_keys(file_name_bytes(path)))
            .collect();

        // Every backup is visited; a failed removal never stops the rest
        let mut all_removed = true;
        for path in backups {
            let stem = backup_stem(file_name_bytes(path));
            if protected.contains(stem) {
                all_removed = false;
                continue;
            }
            all_removed &= self.remove(path);
        }

        originals.is_empty() && all_removed
    }

    fn remove(&self, path: &Path) -> bool {
        match self.fs.remove_file(path) {
            Ok(()) => {
                self.observer
                    .on_event(&CleanupEvent::FileDeleted { path: path.to_path_buf() });
                true
            }
            Err(e) => {
                self.observer.on_event(&CleanupEvent::DeletionFailed {
                    path: path.to_path_buf(),
                    cause: DeletionCause::from(&e),
                });
                false
            }
        }
    }
}

impl CleanupTask for BackupFileBatch {
    fn compute(self) -> bool {
        self.process()
    }
}
