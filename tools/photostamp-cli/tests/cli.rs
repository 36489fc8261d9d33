use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn photostamp(root: &Path, extra: &[&str]) -> Output {
    Command::cargo_bin("photostamp")
        .expect("binary should build")
        .current_dir(root)
        .env("XDG_CONFIG_HOME", root.join("config"))
        .env_remove("RUST_LOG")
        .args(extra)
        .output()
        .expect("binary should run")
}

fn workspace() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("source")).unwrap();
    root
}

#[test]
fn malformed_start_time_fails_before_touching_files() {
    let root = workspace();
    let output = photostamp(root.path(), &["--sdt", "2023-13-40 00:00:00"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "stderr: {stderr}");
    assert!(!root.path().join("target").exists());
}

#[test]
fn inverted_bounds_fail() {
    let root = workspace();
    let output = photostamp(
        root.path(),
        &["--sdt", "2023-01-01 00:00:00", "--min-sec", "10", "--max-sec", "5"],
    );

    assert!(!output.status.success());
    assert!(!root.path().join("target").exists());
}

#[test]
fn negative_bound_fails() {
    let root = workspace();
    let output = photostamp(root.path(), &["--sdt", "2023-01-01 00:00:00", "--min-sec", "-1"]);
    assert!(!output.status.success());
}

#[test]
fn missing_start_time_fails() {
    let root = workspace();
    let output = photostamp(root.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn empty_source_exits_successfully_without_archive() {
    let root = workspace();
    let output = photostamp(root.path(), &["--sdt", "2023-01-01 00:00:00"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Not found source files"), "stdout: {stdout}");
    assert!(!root.path().join("target").join("photos.zip").exists());
}

#[test]
fn stamps_and_reports_archive_location() {
    let root = workspace();
    for name in ["a.png", "b.png"] {
        RgbImage::from_pixel(80, 60, Rgb([0, 0, 0]))
            .save(root.path().join("source").join(name))
            .unwrap();
    }

    let output = photostamp(
        root.path(),
        &["--sdt", "2023-01-01 00:00:00", "--min-sec", "5", "--max-sec", "6", "--seed", "9"],
    );

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Success! Zip archive available in"), "stdout: {stdout}");
    assert!(stdout.contains("photos.zip"));

    let target = root.path().join("target");
    assert!(target.join("a.jpg").is_file());
    assert!(target.join("b.jpg").is_file());
    assert!(target.join("photos.zip").is_file());
}

#[test]
fn unparsable_config_is_warned_about_and_defaults_apply() {
    let root = workspace();
    let config_dir = root.path().join("config").join("photostamp");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), "{ not json").unwrap();

    let output = photostamp(root.path(), &["--sdt", "2023-01-01 00:00:00"]);

    assert!(output.status.success(), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config"), "stderr: {stderr}");
    assert!(stderr.contains("using defaults"), "stderr: {stderr}");
}

#[test]
fn missing_explicit_config_fails() {
    let root = workspace();
    let output = photostamp(
        root.path(),
        &["--config", "missing.json", "--sdt", "2023-01-01 00:00:00"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(!root.path().join("target").exists());
}

#[test]
fn explicit_config_sets_archive_name() {
    let root = workspace();
    RgbImage::from_pixel(80, 60, Rgb([0, 0, 0]))
        .save(root.path().join("source").join("a.png"))
        .unwrap();
    std::fs::write(root.path().join("custom.json"), r#"{ "archive_name": "custom.zip" }"#).unwrap();

    let output = photostamp(
        root.path(),
        &["--config", "custom.json", "--sdt", "2023-01-01 00:00:00"],
    );

    assert!(output.status.success(), "{output:?}");
    assert!(root.path().join("target").join("custom.zip").is_file());
}
