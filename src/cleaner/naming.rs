//! Backup/original classification by file name.
//!
//! Names are handled as raw encoded bytes so that non-UTF-8 names are
//! classified exactly, without lossy conversion.

use std::ffi::OsStr;
use std::path::Path;

/// Suffix that marks a backup file
pub const BACKUP_SUFFIX: &str = ".bak";

/// Encoded bytes of the final path component, empty if there is none
pub fn file_name_bytes(path: &Path) -> &[u8] {
    path.file_name()
        .map(OsStr::as_encoded_bytes)
        .unwrap_or_default()
}

/// True if `name` ends in `.bak` and is longer than the suffix alone
pub fn is_backup(name: &[u8]) -> bool {
    name.len() > BACKUP_SUFFIX.len() && name.ends_with(BACKUP_SUFFIX.as_bytes())
}

/// Stem of a backup name: the name with `.bak` stripped, nothing more
pub fn backup_stem(name: &[u8]) -> &[u8] {
    debug_assert!(is_backup(name));
    &name[..name.len() - BACKUP_SUFFIX.len()]
}

/// Stem of an ordinary name: everything before the last `.`.
///
/// A name whose only dot is the leading one (`.profile`) has no extension
/// and is its own stem.
pub fn stem(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b'.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Keys under which an original protects a backup.
///
/// `a.txt` protects `a.txt.bak` (full name) and `a.bak` (stem).
pub fn original_keys(name: &[u8]) -> [&[u8]; 2] {
    [name, stem(name)]
}

/// Key used to split a directory's files into independent groups.
///
/// A backup is always `<original-name>.bak`, so a backup and its
/// original start with the same byte and land in the same group.
pub fn partition_key(name: &[u8]) -> Option<u8> {
    name.first().copied()
}
