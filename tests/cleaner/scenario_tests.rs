// Concrete before/after trees for a single run

use super::support::{build_tree, cleaner, set, snapshot};
use bakprune::{Scheduler, SchedulerConfig, TreeCleaner};
use tempfile::TempDir;

#[test]
fn test_backup_of_present_original_is_kept() {
    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    build_tree(&d, &["a.txt", "a.txt.bak"]);

    assert!(!cleaner(2).run(&d));
    assert_eq!(snapshot(&d), set(&["a.txt", "a.txt.bak"]));
}

#[test]
fn test_lone_orphan_and_directory_removed() {
    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    build_tree(&d, &["b.bak"]);

    assert!(cleaner(2).run(&d));
    assert!(!d.exists());
}

#[test]
fn test_empty_subdirectory_and_orphan_removed() {
    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    build_tree(&d, &["sub/", "c.bak"]);

    assert!(cleaner(2).run(&d));
    assert!(!d.exists());
}

#[test]
fn test_backup_matching_original_stem_is_kept() {
    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    build_tree(&d, &["e.txt", "e.bak"]);

    assert!(!cleaner(2).run(&d));
    assert_eq!(snapshot(&d), set(&["e.bak", "e.txt"]));
}

#[test]
fn test_nested_tree_mixed_outcomes() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    build_tree(
        &root,
        &[
            "keep/report.doc",
            "keep/report.doc.bak",
            "keep/stale.bak",
            "gone/one.bak",
            "gone/deeper/two.bak",
            "gone/deeper/empty/",
            "partly/ok/three.bak",
            "partly/notes.txt",
            "orphan.bak",
        ],
    );

    assert!(!cleaner(4).run(&root));
    assert_eq!(
        snapshot(&root),
        set(&["keep/", "keep/report.doc", "keep/report.doc.bak", "partly/", "partly/notes.txt"])
    );
}

#[test]
fn test_deep_chain_collapses_in_one_pass() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let deep: String = (0..64).map(|i| format!("level{}/", i)).collect();
    build_tree(&root, &[&format!("{}last.bak", deep)]);

    assert!(cleaner(2).run(&root));
    assert!(!root.exists());
}

#[test]
fn test_very_deep_chain_on_sized_stacks() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let deep: String = (0..256).map(|i| format!("d{}/", i)).collect();
    build_tree(&root, &[&format!("{}last.bak", deep), &format!("{}keep.txt", deep)]);

    let config = SchedulerConfig::default()
        .with_threads(2)
        .with_stack_size(32 * 1024 * 1024)
        .with_thread_name_prefix("deep");
    let cleaner = TreeCleaner::new(Scheduler::new(&config).unwrap());

    assert!(!cleaner.run(&root));
    let leaf = root.join(deep.trim_end_matches('/'));
    assert!(leaf.join("keep.txt").exists());
    assert!(!leaf.join("last.bak").exists());
}

#[test]
fn test_missing_root_is_false() {
    let tmp = TempDir::new().unwrap();
    assert!(!cleaner(1).run(&tmp.path().join("absent")));
    assert!(tmp.path().exists());
}

#[test]
fn test_file_root_is_false_and_kept() {
    let tmp = TempDir::new().unwrap();
    build_tree(tmp.path(), &["lonely.bak"]);
    let file = tmp.path().join("lonely.bak");

    assert!(!cleaner(1).run(&file));
    assert!(file.exists());
}

#[test]
fn test_hidden_and_bare_suffix_names() {
    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    build_tree(&d, &[".bak", ".env.bak", "x/.profile", "x/.profile.bak"]);

    assert!(!cleaner(2).run(&d));
    assert_eq!(snapshot(&d), set(&[".bak", "x/", "x/.profile", "x/.profile.bak"]));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_followed() {
    let tmp = TempDir::new().unwrap();
    let outside = tmp.path().join("outside");
    build_tree(&outside, &["precious.bak"]);
    let d = tmp.path().join("d");
    build_tree(&d, &["z.bak"]);
    std::os::unix::fs::symlink(&outside, d.join("link")).unwrap();

    // The link is treated as an original file named "link"
    assert!(!cleaner(2).run(&d));
    assert!(outside.join("precious.bak").exists());
    assert_eq!(snapshot(&d), set(&["link/", "link/precious.bak"]));
}

// Some unix filesystems (APFS) refuse names that are not valid UTF-8
#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_names_classified_by_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();
    let d = tmp.path().join("d");
    std::fs::create_dir(&d).unwrap();

    let original = d.join(OsStr::from_bytes(b"\xff\xfe.txt"));
    let protected = d.join(OsStr::from_bytes(b"\xff\xfe.bak"));
    let orphan = d.join(OsStr::from_bytes(b"\xff\xfd.bak"));
    for path in [&original, &protected, &orphan] {
        std::fs::write(path, b"x").unwrap();
    }

    assert!(!cleaner(2).run(&d));
    assert!(original.exists());
    assert!(protected.exists());
    assert!(!orphan.exists());
}
