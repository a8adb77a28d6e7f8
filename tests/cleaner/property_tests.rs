// Whole-run properties: idempotence, thread-count independence,
// partition independence, and the bottom-up removal rule

use super::support::{build_tree, cleaner, snapshot, MIXED_TREE};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn cleaned_snapshot(threads: usize, entries: &[&str]) -> (bool, BTreeSet<String>) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    build_tree(&root, entries);
    let outcome = cleaner(threads).run(&root);
    (outcome, snapshot(&root))
}

#[test]
fn test_second_run_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    build_tree(&root, MIXED_TREE);

    let first = cleaner(4).run(&root);
    let after_first = snapshot(&root);
    let report = cleaner(4).run_with_report(&root);

    assert!(!first);
    assert!(!report.reclaimed);
    assert_eq!(snapshot(&root), after_first);
    assert_eq!(report.stats.files_deleted, 0);
    assert_eq!(report.stats.dirs_deleted, 0);
    assert_eq!(report.stats.errors(), 0);
}

#[test]
fn test_result_independent_of_thread_count() {
    let baseline = cleaned_snapshot(1, MIXED_TREE);
    for threads in [2, 3, 8] {
        assert_eq!(cleaned_snapshot(threads, MIXED_TREE), baseline);
    }
}

#[test]
fn test_result_independent_of_creation_order() {
    let mut reversed: Vec<&str> = MIXED_TREE.to_vec();
    reversed.reverse();
    assert_eq!(cleaned_snapshot(4, &reversed), cleaned_snapshot(4, MIXED_TREE));
}

#[test]
fn test_mixed_tree_expected_survivors() {
    let (outcome, survivors) = cleaned_snapshot(4, MIXED_TREE);
    assert!(!outcome);

    let expected: BTreeSet<String> = [
        "a.txt",
        "a.txt.bak",
        "Zeta.txt",
        "docs/",
        "docs/guide.md",
        "docs/guide.bak",
        "media/",
        "media/img.png",
        "media/img.png.bak",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(survivors, expected);
}

#[test]
fn test_other_partitions_do_not_affect_decision() {
    // Names starting with 'q' never interact with names starting with other bytes
    let base = &["q.bak", "qq.txt"];
    let (_, alone) = cleaned_snapshot(2, base);
    let (_, with_noise) = cleaned_snapshot(2, &["q.bak", "qq.txt", "r.txt", "p.bak", "q.md/"]);

    let q_only = |s: &BTreeSet<String>| -> BTreeSet<String> {
        s.iter().filter(|n| n.starts_with('q') && !n.ends_with('/')).cloned().collect()
    };
    assert_eq!(q_only(&alone), q_only(&with_noise));
    assert!(!alone.contains("q.bak"));
}

#[test]
fn test_backup_kept_whatever_the_original_extension() {
    for original in ["report.txt", "report.md", "report"] {
        let (_, survivors) = cleaned_snapshot(2, &[original, "report.bak"]);
        assert!(survivors.contains("report.bak"), "kept next to {}", original);
    }
    let (_, survivors) = cleaned_snapshot(2, &["reporter.txt", "report.bak"]);
    assert!(!survivors.contains("report.bak"));
}

#[test]
fn test_directory_removed_iff_all_children_eliminated() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    build_tree(
        &root,
        &["all/a.bak", "all/inner/b.bak", "one_left/c.bak", "one_left/inner/keep.txt"],
    );

    cleaner(3).run(&root);

    assert!(!root.join("all").exists());
    assert!(root.join("one_left").exists());
    assert!(!root.join("one_left").join("c.bak").exists());
    assert!(root.join("one_left").join("inner").join("keep.txt").exists());
}
