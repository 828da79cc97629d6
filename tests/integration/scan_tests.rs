use dirdupes::duplicates::group;
use dirdupes::fixture::FixtureTree;
use dirdupes::scanner::{scan, ScanConfig, ScanError, ScanErrorKind, Walker};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_canonical_tree_end_to_end() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    FixtureTree::canonical().materialize(&root).unwrap();

    let report = group(&scan(&root).unwrap());

    let expected: BTreeMap<Vec<u8>, Vec<PathBuf>> = [
        (
            b"xyz".to_vec(),
            vec![root.join("a.txt"), root.join("foo/c.txt")],
        ),
        (
            b"abc".to_vec(),
            vec![root.join("b.txt"), root.join("foo/bar/e.txt")],
        ),
        (b"123".to_vec(), vec![root.join("foo/d.txt")]),
    ]
    .into_iter()
    .collect();

    assert_eq!(report.normalized(), expected);
}

#[test]
fn test_canonical_rows_in_path_order() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    FixtureTree::canonical().materialize(&root).unwrap();

    let rows = group(&scan(&root).unwrap()).to_rows();

    let contents: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(contents, vec!["xyz", "abc", "123"]);
    assert!(rows.iter().all(|r| r.len() >= 2));
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let result = scan(dir.path()).unwrap();
    let report = group(&result);

    assert!(result.is_empty());
    assert!(report.is_empty());
    assert!(report.to_rows().is_empty());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    for (name, content) in [("a.txt", "content a"), ("b.txt", "content b"), ("c.txt", "content c")] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    let report = group(&scan(dir.path()).unwrap());

    assert_eq!(report.len(), 3);
    assert!(!report.has_duplicates());
    assert!(report.iter().all(|g| g.len() == 1));
}

#[test]
fn test_nonexistent_root_produces_no_report() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = scan(&missing).unwrap_err();

    assert!(matches!(err, ScanError::NotFound(ref p) if p == &missing));
    assert_eq!(err.kind(), ScanErrorKind::Traversal);
}

#[test]
fn test_file_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"data").unwrap();

    let err = scan(&file).unwrap_err();

    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn test_directories_never_appear_as_paths() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("a/b/c/leaf.txt"), b"leaf").unwrap();

    let result = scan(dir.path()).unwrap();

    assert_eq!(result.len(), 1);
    assert!(result.contains(&dir.path().join("a/b/c/leaf.txt")));
    assert!(!result.contains(&dir.path().join("empty")));
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    FixtureTree::canonical().materialize(&root).unwrap();

    let first = group(&scan(&root).unwrap());
    let second = group(&scan(&root).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_parallel_scan_matches_sequential() {
    let dir = tempdir().unwrap();
    let mut tree = FixtureTree::new();
    for i in 0..64 {
        tree = tree.with_file(format!("d{}/f{}.bin", i % 7, i), format!("v{}", i % 5));
    }
    tree.materialize(dir.path()).unwrap();

    let sequential = Walker::new(dir.path(), ScanConfig::default()).scan().unwrap();
    let parallel = Walker::new(dir.path(), ScanConfig::default().with_parallel(true))
        .scan()
        .unwrap();

    assert_eq!(sequential.result, parallel.result);
    assert_eq!(group(&parallel.result).len(), 5);
}

#[test]
fn test_paths_are_joined_onto_root() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), b"x").unwrap();

    let result = scan(dir.path()).unwrap();

    let paths: Vec<_> = result.paths().collect();
    assert_eq!(paths, vec![dir.path().join("x.txt").as_path()]);
}
