use dirdupes::scanner::{ErrorPolicy, ScanConfig, Walker};

#[cfg(unix)]
mod unix {
    use super::*;
    use dirdupes::duplicates::group;
    use dirdupes::error::ExitCode;
    use dirdupes::scanner::{ScanError, ScanErrorKind};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::tempdir;

    /// Permission bits are not enforced for privileged users.
    fn permissions_enforced(path: &Path) -> bool {
        fs::read(path).is_err() && fs::read_dir(path).is_err()
    }

    fn lock(path: &Path) {
        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    }

    fn unlock_file(path: &Path) {
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    fn unlock_dir(path: &Path) {
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_unreadable_file_aborts_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"same").unwrap();
        fs::write(dir.path().join("b.txt"), b"same").unwrap();
        let locked = dir.path().join("locked.txt");
        fs::write(&locked, b"secret").unwrap();
        lock(&locked);
        if fs::read(&locked).is_ok() {
            unlock_file(&locked);
            return;
        }

        let result = Walker::new(dir.path(), ScanConfig::default()).scan();
        unlock_file(&locked);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ScanErrorKind::Read);
        assert_eq!(err.path(), locked.as_path());
    }

    #[test]
    fn test_unreadable_file_skipped_under_skip_policy() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"same").unwrap();
        fs::write(dir.path().join("b.txt"), b"same").unwrap();
        let locked = dir.path().join("locked.txt");
        fs::write(&locked, b"same").unwrap();
        lock(&locked);
        if fs::read(&locked).is_ok() {
            unlock_file(&locked);
            return;
        }

        let config = ScanConfig::default().with_error_policy(ErrorPolicy::Skip);
        let outcome = Walker::new(dir.path(), config).scan();
        unlock_file(&locked);
        let outcome = outcome.unwrap();

        assert_eq!(outcome.result.len(), 2);
        assert!(!outcome.result.contains(&locked));
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(outcome.skipped[0], ScanError::Read { .. }));

        let report = group(&outcome.result);
        let summary = report.summary();
        assert_eq!(
            ExitCode::from_scan(&summary, outcome.skipped.len()),
            ExitCode::PartialSuccess
        );
    }

    #[test]
    fn test_unreadable_directory_policies() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.txt"), b"top").unwrap();
        let sealed = dir.path().join("sealed");
        fs::create_dir(&sealed).unwrap();
        fs::write(sealed.join("inner.txt"), b"inner").unwrap();
        lock(&sealed);
        if !permissions_enforced(&sealed) {
            unlock_dir(&sealed);
            return;
        }

        let abort = Walker::new(dir.path(), ScanConfig::default()).scan();
        let skip = Walker::new(
            dir.path(),
            ScanConfig::default().with_error_policy(ErrorPolicy::Skip),
        )
        .scan();
        unlock_dir(&sealed);

        let err = abort.unwrap_err();
        assert_eq!(err.kind(), ScanErrorKind::Traversal);

        let outcome = skip.unwrap();
        assert_eq!(outcome.result.len(), 1);
        assert!(outcome.result.contains(&dir.path().join("top.txt")));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].kind(), ScanErrorKind::Traversal);
    }

    #[test]
    fn test_unreadable_root_fatal_under_either_policy() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();
        lock(&root);
        if !permissions_enforced(&root) {
            unlock_dir(&root);
            return;
        }

        let skip = Walker::new(
            &root,
            ScanConfig::default().with_error_policy(ErrorPolicy::Skip),
        )
        .scan();
        let skip_parallel = Walker::new(
            &root,
            ScanConfig::default()
                .with_error_policy(ErrorPolicy::Skip)
                .with_parallel(true),
        )
        .scan();
        let abort = Walker::new(&root, ScanConfig::default()).scan();
        unlock_dir(&root);

        for result in [skip, skip_parallel, abort] {
            let err = result.unwrap_err();
            assert!(matches!(err, ScanError::Walk { .. }));
            assert_eq!(err.kind(), ScanErrorKind::Traversal);
            assert_eq!(err.path(), root.as_path());
        }
    }

    #[test]
    fn test_parallel_abort_on_unreadable_file() {
        let dir = tempdir().unwrap();
        for i in 0..16 {
            fs::write(dir.path().join(format!("f{i}.txt")), b"x").unwrap();
        }
        let locked = dir.path().join("locked.txt");
        fs::write(&locked, b"x").unwrap();
        lock(&locked);
        if fs::read(&locked).is_ok() {
            unlock_file(&locked);
            return;
        }

        let config = ScanConfig::default().with_parallel(true);
        let result = Walker::new(dir.path(), config).scan();
        unlock_file(&locked);

        assert!(matches!(result, Err(ScanError::Read { .. })));
    }
}

#[test]
fn test_skip_policy_on_clean_tree_skips_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

    let config = ScanConfig::default().with_error_policy(ErrorPolicy::Skip);
    let outcome = Walker::new(dir.path(), config).scan().unwrap();

    assert_eq!(outcome.result.len(), 1);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_missing_root_fatal_under_skip_policy() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScanConfig::default().with_error_policy(ErrorPolicy::Skip);

    let result = Walker::new(&dir.path().join("missing"), config).scan();

    assert!(result.is_err());
}
