use dirdupes::duplicates::group;
use dirdupes::error::ExitCode;
use dirdupes::output::{JsonOutput, OutputFormat, RenderContext, RowsOutput};
use dirdupes::scanner::path_utils::display_path;
use dirdupes::scanner::scan;
use std::fs;
use tempfile::tempdir;
use unicode_normalization::UnicodeNormalization;

#[test]
fn test_paths_with_spaces() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("my docs")).unwrap();
    fs::write(dir.path().join("my docs/report final.txt"), b"same").unwrap();
    fs::write(dir.path().join("copy of report.txt"), b"same").unwrap();

    let report = group(&scan(dir.path()).unwrap());

    assert_eq!(report.len(), 1);
    assert_eq!(report.groups[0].len(), 2);
    assert!(report.groups[0]
        .paths
        .iter()
        .any(|p| p.ends_with("my docs/report final.txt")));
}

#[test]
fn test_paths_with_quotes_in_rows() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        fs::write(dir.path().join("say \"hi\".txt"), b"hi").unwrap();
        fs::write(dir.path().join("plain.txt"), b"hi").unwrap();

        let report = group(&scan(dir.path()).unwrap());
        let json = RowsOutput::new(&report).to_json().unwrap();

        let rows: Vec<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].iter().any(|p| p.ends_with("say \"hi\".txt")));
    }
}

#[test]
fn test_unicode_names_are_displayed_nfc() {
    let dir = tempdir().unwrap();
    let decomposed: String = "café.txt".nfd().collect();
    fs::write(dir.path().join(&decomposed), b"latte").unwrap();

    let result = scan(dir.path()).unwrap();
    let path = result.paths().next().unwrap();

    assert!(display_path(path).ends_with("café.txt"));
}

#[test]
fn test_non_utf8_content_in_json_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), [0xffu8, 0xfe, 0x00]).unwrap();
    fs::write(dir.path().join("b.bin"), [0xffu8, 0xfe, 0x00]).unwrap();

    let report = group(&scan(dir.path()).unwrap());
    let summary = report.summary();
    let ctx = RenderContext::new(&summary, &[], ExitCode::Success);
    let json = JsonOutput::new(&report, &ctx).to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["groups"][0]["count"], 2);
    assert_eq!(value["groups"][0]["size"], 3);
    assert!(value["groups"][0]["content"]
        .as_str()
        .unwrap()
        .contains('\u{fffd}'));
}

#[test]
fn test_every_format_renders_unicode_content() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), "naïve ✓").unwrap();
    fs::write(dir.path().join("y.txt"), "naïve ✓").unwrap();

    let report = group(&scan(dir.path()).unwrap());
    let summary = report.summary();
    let ctx = RenderContext::new(&summary, &[], ExitCode::Success);

    for format in [
        OutputFormat::Text,
        OutputFormat::Rows,
        OutputFormat::Json,
        OutputFormat::Csv,
    ] {
        let mut buf = Vec::new();
        dirdupes::output::render(&report, format, &ctx, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("naïve ✓"), "{format} output lost content");
    }
}
