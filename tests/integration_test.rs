mod common;

use common::ArchiveServer;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_build(cache_dir: &Path, base_url: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_revealprez"))
        .arg("build")
        .args(args)
        .env("REVEALJS_BASE_URL", base_url)
        .env("REVEALJS_VERSION", "4.1.0")
        .env("REVEALPREZ_CACHE_DIR", cache_dir)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_build_command() {
    let server = ArchiveServer::start("4.1.0");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("talk");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir_all(&input).unwrap();
    fs::write(
        input.join("index.md"),
        "# Intro\n----SLIDE----\n<!-- embed: code.md -->",
    )
    .unwrap();
    fs::write(input.join("code.md"), "```sh\necho hi\n```").unwrap();

    let output = run_build(
        &temp_dir.path().join("cache"),
        &server.base_url,
        &[
            "--input-dir",
            input.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = fs::read_to_string(output_dir.join("index.html")).expect("Missing index.html");
    assert_eq!(html.matches("<section data-markdown>").count(), 2);
    assert!(html.contains("# Intro"));
    assert!(html.contains("echo hi"));
    assert!(output_dir.join("dist/reveal.js").is_file());
    assert!(!output_dir.join("assets").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Assets dir not found"), "stderr: {}", stderr);
}

#[test]
fn test_build_command_missing_embed_fails() {
    let server = ArchiveServer::start("4.1.0");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("talk");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("index.md"), "<!-- embed: gone.md -->").unwrap();

    let output = run_build(
        &temp_dir.path().join("cache"),
        &server.base_url,
        &[
            "--input-dir",
            input.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1), "Unexpected exit: {:?}", output);
    assert!(!output_dir.join("index.html").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gone.md"), "stderr: {}", stderr);
}

#[test]
fn test_build_command_custom_separator() {
    let server = ArchiveServer::start("4.1.0");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("talk");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("slides.md"), "a\n%%%\nb\n%%%\nc").unwrap();

    let output = run_build(
        &temp_dir.path().join("cache"),
        &server.base_url,
        &[
            "--input-dir",
            input.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--filename",
            "slides.md",
            "--separator",
            "%%%",
        ],
    );

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html = fs::read_to_string(output_dir.join("index.html")).unwrap();
    assert_eq!(html.matches("<section data-markdown>").count(), 3);
}

#[test]
fn test_build_command_bad_embed_pattern_is_config_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("talk");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("index.md"), "x").unwrap();

    let output = run_build(
        &temp_dir.path().join("cache"),
        "http://127.0.0.1:9/archive",
        &[
            "--input-dir",
            input.to_str().unwrap(),
            "--embed-pattern",
            "no-groups",
        ],
    );

    assert_eq!(output.status.code(), Some(2), "Unexpected exit: {:?}", output);
}
