use std::fs;
use std::io::Cursor;

use tempfile::TempDir;

use md2docx::{Config, ConvertError, convert, convert_dir};

#[test]
fn converts_next_to_input_by_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Title\n\nSome **bold** text.\n").unwrap();

    let result = convert(&input, None, None, &Config::default());
    let output = result.outcome.expect("conversion failed");
    assert_eq!(output, dir.path().join("notes.docx"));

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[test]
fn output_package_contains_document_and_styles() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "hello\n").unwrap();

    let result = convert(&input, None, None, &Config::default());
    let bytes = fs::read(result.outcome.unwrap()).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing part {name}");
    }
}

#[test]
fn repeated_conversion_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# A\n\n- one\n- two\n\n| H |\n|---|\n| c |\n").unwrap();

    let first = dir.path().join("first.docx");
    let second = dir.path().join("second.docx");
    convert(&input, Some(&first), None, &Config::default())
        .outcome
        .unwrap();
    convert(&input, Some(&second), None, &Config::default())
        .outcome
        .unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn missing_input_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let result = convert(
        &dir.path().join("absent.md"),
        None,
        None,
        &Config::default(),
    );
    assert!(matches!(
        result.outcome,
        Err(ConvertError::InputNotFound(_))
    ));
}

#[test]
fn broken_template_falls_back_to_builtin_styles() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Title\n").unwrap();
    let template = dir.path().join("broken.docx");
    fs::write(&template, "not a zip archive").unwrap();

    let result = convert(&input, None, Some(&template), &Config::default());
    assert!(result.is_success());
}

#[test]
fn own_output_is_a_usable_template() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Title\n\ntext\n").unwrap();

    let template = dir.path().join("template.docx");
    convert(&input, Some(&template), None, &Config::default())
        .outcome
        .unwrap();

    let output = dir.path().join("styled.docx");
    let result = convert(&input, Some(&output), Some(&template), &Config::default());
    assert!(result.is_success());
}

#[test]
fn occupied_output_path_is_a_write_failure() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Title\n").unwrap();
    let occupied = dir.path().join("doc.docx");
    fs::create_dir(&occupied).unwrap();

    let result = convert(&input, Some(&occupied), None, &Config::default());
    assert!(matches!(
        result.outcome,
        Err(ConvertError::OutputWriteFailed { .. })
    ));
    // Nothing gets redirected underneath the occupying directory.
    assert!(fs::read_dir(&occupied).unwrap().next().is_none());
}

#[test]
fn directory_conversion_is_sorted_and_skips_non_markdown() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    fs::write(dir.path().join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("readme.txt"), "not markdown\n").unwrap();
    let out = TempDir::new().unwrap();

    let results = convert_dir(dir.path(), Some(out.path()), None, &Config::default());
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_success()));
    assert!(results[0].input.ends_with("a.md"));
    assert!(results[1].input.ends_with("b.md"));
    assert!(out.path().join("a.docx").exists());
    assert!(out.path().join("b.docx").exists());
}

#[test]
fn one_failure_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("good.md"), "# Good\n").unwrap();
    fs::write(dir.path().join("bad.md"), "# Bad\n").unwrap();
    let out = TempDir::new().unwrap();
    // Occupy bad.md's output path with a directory so its write fails.
    fs::create_dir(out.path().join("bad.docx")).unwrap();

    let results = convert_dir(dir.path(), Some(out.path()), None, &Config::default());
    assert_eq!(results.len(), 2);

    let bad = results.iter().find(|r| r.input.ends_with("bad.md")).unwrap();
    assert!(matches!(
        bad.outcome,
        Err(ConvertError::OutputWriteFailed { .. })
    ));

    let good = results
        .iter()
        .find(|r| r.input.ends_with("good.md"))
        .unwrap();
    assert!(good.is_success());
    assert!(out.path().join("good.docx").exists());
}
