//! CLI integration tests for the upscale command
//!
//! These tests run the binary end to end and check the written images.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled binary
fn anime4k_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_anime4k"))
}

/// Write a small line-art style PNG and return its path
fn write_input(dir: &Path, width: u32, height: u32) -> PathBuf {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([235, 225, 215, 255]));
    for i in 0..width.min(height) {
        img.put_pixel(i, i, Rgba([15, 15, 25, 255]));
    }
    let path = dir.join("input.png");
    img.save(&path).expect("should write input image");
    path
}

/// Run the binary from `cwd` so config discovery stays inside the temp dir
fn run_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(anime4k_binary())
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join("xdg"))
        .args(args)
        .output()
        .expect("Failed to execute anime4k")
}

fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output image");
    (img.width(), img.height())
}

#[test]
fn test_default_scale_doubles() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 8, 6);

    let output = run_in(tmp.path(), &["input.png", "out.png"]);

    assert!(output.status.success(), "upscale failed: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(dimensions(&tmp.path().join("out.png")), (16, 12));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8x6 -> 16x12"), "unexpected output: {}", stdout);
    assert!(stdout.contains("Elapsed:"), "missing timing: {}", stdout);
}

#[test]
fn test_output_has_no_alpha() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 5, 5);

    let output = run_in(tmp.path(), &["input.png", "out.png", "--scale", "1.5"]);
    assert!(output.status.success());

    let img = image::open(tmp.path().join("out.png")).unwrap();
    assert!(!img.color().has_alpha());
    assert_eq!((img.width(), img.height()), (7, 7));
}

#[test]
fn test_json_report() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);

    let output = run_in(tmp.path(), &["input.png", "out.png", "--scale", "3", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["source_size"], serde_json::json!([4, 4]));
    assert_eq!(report["target_size"], serde_json::json!([12, 12]));
    assert_eq!(report["color_strength"], 127);
    assert_eq!(report["gradient_strength"], 255);
    assert_eq!(report["pipeline"]["stages"].as_array().map(Vec::len), Some(8));
}

#[test]
fn test_config_file_is_used() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);
    fs::write(tmp.path().join("anime4k.toml"), "[upscale]\nscale = 4.0\n").unwrap();

    let output = run_in(tmp.path(), &["input.png", "out.png"]);
    assert!(output.status.success());
    assert_eq!(dimensions(&tmp.path().join("out.png")), (16, 16));
}

#[test]
fn test_flag_overrides_config() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);
    fs::write(tmp.path().join("anime4k.toml"), "[upscale]\nscale = 4.0\n").unwrap();

    let output = run_in(tmp.path(), &["input.png", "out.png", "--scale", "2"]);
    assert!(output.status.success());
    assert_eq!(dimensions(&tmp.path().join("out.png")), (8, 8));
}

#[test]
fn test_dump_stages() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);

    let output = run_in(tmp.path(), &["input.png", "out.png", "--dump-stages", "stages"]);
    assert!(output.status.success());

    let dir = tmp.path().join("stages");
    for name in ["resized", "0-luminance", "0-push-color", "0-gradient", "1-push-gradient"] {
        assert!(dir.join(format!("{}.png", name)).exists(), "missing {}", name);
    }
}

#[test]
fn test_invalid_scale_exit_code() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);

    let output = run_in(tmp.path(), &["input.png", "out.png", "--scale", "0"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!tmp.path().join("out.png").exists());
}

#[test]
fn test_invalid_config_exit_code() {
    let tmp = TempDir::new().unwrap();
    write_input(tmp.path(), 4, 4);
    fs::write(tmp.path().join("anime4k.toml"), "[upscale]\nscale = \"big\"\n").unwrap();

    let output = run_in(tmp.path(), &["input.png", "out.png"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("anime4k.toml"));
}

#[test]
fn test_missing_input_exit_code() {
    let tmp = TempDir::new().unwrap();

    let output = run_in(tmp.path(), &["missing.png", "out.png"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}
