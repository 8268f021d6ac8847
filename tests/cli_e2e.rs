//! End-to-end CLI tests for chatport.
//!
//! These tests run the actual binary against temporary exports and check the
//! produced archive, the printed summary and the exit status.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use zip::ZipArchive;

// ============================================================================
// Test Fixtures
// ============================================================================

const EXPORT_PAGE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"/></head><body><div class="history">
<div class="message service" id="message-1"><div class="body details">1 February 2023</div></div>
<div class="message default clearfix" id="message1">
  <div class="body">
    <div class="pull_right date details" title="01.02.2023 10:00:00 UTC+0000">10:00</div>
    <div class="from_name">Alice</div>
    <div class="media_wrap clearfix">
      <a class="photo_wrap clearfix pull_left" href="photos/img1.jpg"></a>
    </div>
    <div class="text">Hello</div>
  </div>
</div>
<div class="message default clearfix joined" id="message2">
  <div class="body">
    <div class="pull_right date details" title="01.02.2023 10:00:30 UTC+0000">10:00</div>
    <div class="text">How are you?</div>
  </div>
</div>
<div class="message default clearfix" id="message3">
  <div class="body">
    <div class="pull_right date details" title="not a date">10:01</div>
    <div class="from_name">Bob</div>
    <div class="text">broken</div>
  </div>
</div>
</div></body></html>
"#;

/// `<tmp>/ChatExport/messages.html` plus `photos/img1.jpg`.
fn setup_export() -> (TempDir, PathBuf) {
    let tmp = tempdir().expect("Failed to create temp dir");
    let export = tmp.path().join("ChatExport");
    fs::create_dir_all(export.join("photos")).unwrap();
    fs::write(export.join("messages.html"), EXPORT_PAGE).unwrap();
    fs::write(export.join("photos/img1.jpg"), b"JPEG").unwrap();
    (tmp, export)
}

fn chatport() -> Command {
    Command::cargo_bin("chatport").expect("binary is built")
}

fn archive_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).unwrap();
            (entry.name().to_string(), buf)
        })
        .collect()
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_dir_mode_writes_archive_next_to_export() {
    let (tmp, export) = setup_export();

    chatport()
        .arg("-d")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"))
        .stdout(predicate::str::contains("Media:       1 packed"));

    let zip = tmp.path().join("Whatsapp Chat - ChatExport.zip");
    let entries = archive_entries(&zip);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["IMG-20230201-WA0000.jpg", "_chat.txt"]);
    assert_eq!(
        String::from_utf8(entries[1].1.clone()).unwrap(),
        "[01.02.2023, 10:00:00] Alice: Hello\n\
         [01.02.2023, 10:00:00] Alice: IMG-20230201-WA0000.jpg (file attached)\n\
         [01.02.2023, 10:00:00] Alice: How are you?\n"
    );
}

#[test]
fn test_file_mode_with_output_dir() {
    let (tmp, export) = setup_export();
    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();

    chatport()
        .arg("--file")
        .arg(export.join("messages.html"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("Whatsapp Chat - messages.zip").exists());
}

#[test]
fn test_chat_name_flag() {
    let (tmp, export) = setup_export();

    chatport()
        .args(["--chat-name", "Alice"])
        .arg("-d")
        .arg(&export)
        .assert()
        .success();

    assert!(tmp.path().join("Whatsapp Chat - Alice.zip").exists());
}

#[test]
fn test_structural_error_is_logged_not_fatal() {
    let (_tmp, export) = setup_export();

    chatport()
        .arg("-d")
        .arg(&export)
        .assert()
        .success()
        .stderr(predicate::str::contains("not a date"))
        .stdout(predicate::str::contains("Dropped:     1"));
}

#[test]
fn test_no_fragments_hides_markup() {
    let (_tmp, export) = setup_export();

    chatport()
        .arg("-d")
        .arg(&export)
        .arg("--no-fragments")
        .assert()
        .success()
        .stderr(predicate::str::contains("<div class=\"from_name\">Bob</div>").not());
}

#[test]
fn test_quiet_suppresses_info_logs() {
    let (_tmp, export) = setup_export();

    chatport()
        .arg("-d")
        .arg(&export)
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::contains("ZIP file written").not());
}

#[test]
fn test_missing_media_warns() {
    let (_tmp, export) = setup_export();
    fs::remove_file(export.join("photos/img1.jpg")).unwrap();

    chatport()
        .arg("-d")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing:     1 media files"))
        .stderr(predicate::str::contains("img1.jpg"));
}

#[test]
fn test_report_written_as_json() {
    let (tmp, export) = setup_export();
    let report = tmp.path().join("report.json");

    chatport()
        .arg("-d")
        .arg(&export)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["archive"]["media_written"], 1);
    assert_eq!(value["files"][0]["stats"]["retained"], 2);
    assert_eq!(value["files"][0]["issues"][0]["kind"]["type"], "structural");
}

// ============================================================================
// Argument and error handling
// ============================================================================

#[test]
fn test_input_is_required() {
    chatport().assert().failure().code(2);
}

#[test]
fn test_file_and_dir_conflict() {
    let (_tmp, export) = setup_export();

    chatport()
        .arg("-f")
        .arg(export.join("messages.html"))
        .arg("-d")
        .arg(&export)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_input_file_fails() {
    let tmp = tempdir().unwrap();

    chatport()
        .arg("-f")
        .arg(tmp.path().join("nope.html"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_directory_without_html_fails() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hi").unwrap();

    chatport()
        .arg("-d")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_help_and_version() {
    chatport()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dir"))
        .stdout(predicate::str::contains("--file"));

    chatport()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
