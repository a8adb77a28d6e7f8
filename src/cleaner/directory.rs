//! Per-directory task: split, fan out, join, and remove when empty.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::batch::BackupFileBatch;
use super::naming::{file_name_bytes, partition_key};
use super::observer::{CleanupEvent, DeletionCause, SharedObserver};
use super::scheduler::{fork_join_pair, CleanupTask};
use crate::fs::{FsEntry, RemoveOutcome, TreeFs};

/// Owns the removal decision for exactly one directory.
///
/// Files are grouped by the first byte of their name into
/// [`BackupFileBatch`]es, each subdirectory gets its own `DirectoryTask`,
/// and everything is forked at once. The directory is removed only when
/// every batch and every subdirectory came back fully reclaimed.
pub struct DirectoryTask {
    path: PathBuf,
    fs: Arc<dyn TreeFs>,
    observer: SharedObserver,
}

impl DirectoryTask {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn TreeFs>, observer: SharedObserver) -> Self {
        Self {
            path: path.into(),
            fs,
            observer,
        }
    }

    pub fn process(&self) -> bool {
        self.observer.on_event(&CleanupEvent::TaskStarted {
            path: self.path.clone(),
        });

        // Point-in-time listing; entries may come and go while we work
        let entries = match self.fs.list(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                self.observer.on_event(&CleanupEvent::ListingFailed {
                    path: self.path.clone(),
                    cause: e.to_string(),
                });
                return false;
            }
        };

        let (dirs, files): (Vec<FsEntry>, Vec<FsEntry>) =
            entries.into_iter().partition(FsEntry::is_dir);

        let batches = self.file_batches(files);
        let subdirs: Vec<DirectoryTask> = dirs
            .into_iter()
            .map(|entry| self.child(entry.path))
            .collect();

        let (files_reclaimed, dirs_reclaimed) = fork_join_pair(batches, subdirs);
        if !(files_reclaimed && dirs_reclaimed) {
            return false;
        }

        self.remove_self()
    }

    /// Group files into disjoint batches by partition key
    fn file_batches(&self, files: Vec<FsEntry>) -> Vec<BackupFileBatch> {
        let mut groups: HashMap<Option<u8>, Vec<PathBuf>> = HashMap::new();
        for entry in files {
            let key = partition_key(file_name_bytes(&entry.path));
            groups.entry(key).or_default().push(entry.path);
        }

        groups
            .into_values()
            .map(|group| {
                BackupFileBatch::new(group, Arc::clone(&self.fs), Arc::clone(&self.observer))
            })
            .collect()
    }

    fn child(&self, path: PathBuf) -> DirectoryTask {
        DirectoryTask::new(path, Arc::clone(&self.fs), Arc::clone(&self.observer))
    }

    fn remove_self(&self) -> bool {
        match self.fs.remove_dir(&self.path) {
            RemoveOutcome::Removed => {
                self.observer.on_event(&CleanupEvent::DirectoryDeleted {
                    path: self.path.clone(),
                });
                true
            }
            RemoveOutcome::NotEmpty => {
                self.observer.on_event(&CleanupEvent::DeletionFailed {
                    path: self.path.clone(),
                    cause: DeletionCause::NotEmpty,
                });
                false
            }
            RemoveOutcome::Failed(e) => {
                self.observer.on_event(&CleanupEvent::DeletionFailed {
                    path: self.path.clone(),
                    cause: DeletionCause::from(&e),
                });
                false
            }
        }
    }
}

impl CleanupTask for DirectoryTask {
    fn compute(self) -> bool {
        self.process()
    }
}
