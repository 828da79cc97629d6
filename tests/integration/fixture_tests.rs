use dirdupes::fixture::{FixtureError, FixtureTree};
use dirdupes::scanner::scan;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_canonical_fixture_files_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");

    let written = FixtureTree::canonical().materialize(&root).unwrap();

    assert_eq!(written.len(), 5);
    assert_eq!(fs::read(root.join("a.txt")).unwrap(), b"xyz");
    assert_eq!(fs::read(root.join("b.txt")).unwrap(), b"abc");
    assert_eq!(fs::read(root.join("foo/c.txt")).unwrap(), b"xyz");
    assert_eq!(fs::read(root.join("foo/d.txt")).unwrap(), b"123");
    assert_eq!(fs::read(root.join("foo/bar/e.txt")).unwrap(), b"abc");
}

#[test]
fn test_scan_reads_back_fixture_exactly() {
    let dir = tempdir().unwrap();
    let tree = FixtureTree::canonical().with_file("deep/er/still/z.bin", [0u8, 255, 7]);

    tree.materialize(dir.path()).unwrap();
    let result = scan(dir.path()).unwrap();

    assert_eq!(result.len(), tree.len());
    for (relative, content) in tree.iter() {
        assert_eq!(result.get(&dir.path().join(relative)), Some(content));
    }
}

#[test]
fn test_materialize_twice_overwrites() {
    let dir = tempdir().unwrap();

    FixtureTree::new()
        .with_file("a.txt", "old")
        .materialize(dir.path())
        .unwrap();
    FixtureTree::new()
        .with_file("a.txt", "new")
        .materialize(dir.path())
        .unwrap();

    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"new");
}

#[test]
fn test_escaping_path_writes_nothing() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base");

    let err = FixtureTree::new()
        .with_file("ok.txt", "fine")
        .with_file("../outside.txt", "nope")
        .materialize(&base)
        .unwrap_err();

    assert!(matches!(err, FixtureError::InvalidPath(_)));
    assert!(!base.exists());
    assert!(!dir.path().join("outside.txt").exists());
}

#[test]
fn test_file_in_place_of_directory_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("foo"), b"blocking file").unwrap();

    let err = FixtureTree::canonical().materialize(dir.path()).unwrap_err();

    assert!(matches!(
        err,
        FixtureError::CreateDir { .. } | FixtureError::WriteFile { .. }
    ));
}
