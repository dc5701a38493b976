//! Smoke tests for the rowview binary.
//!
//! Each run points `--config` at a scratch file so logs land in the temp
//! directory instead of the user's state directory.

use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rowview_smoke_{}", name));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    let config = dir.join("config.toml");
    let log = dir.join("rowview.log");
    std::fs::write(
        &config,
        format!("row_count = 100\nlog_file_path = {:?}\n", log.to_string_lossy()),
    )
    .expect("write scratch config");
    config
}

fn run(name: &str, args: &[&str]) -> Output {
    let config = scratch_config(name);
    Command::new(env!("CARGO_BIN_EXE_rowview"))
        .env_remove("ROWVIEW_VIEWPORT_HEIGHT")
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn smoke_prints_one_line_per_pass() {
    let output = run(
        "text",
        &["--viewport", "200", "--step", "scroll=25", "--step", "viewport=400"],
    );
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "initial pass plus two steps: {}", stdout);
    assert_eq!(
        lines[1],
        "pass 1: rows 1..12 inserted [10, 11] removed [0] top -5px pooled 1"
    );
    assert!(lines[2].starts_with("pass 2: rows 1..22"), "{}", lines[2]);
}

#[test]
fn smoke_json_output_parses() {
    let output = run("json", &["--json", "--viewport", "100", "-s", "reveal=50"]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let passes: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();

    assert_eq!(passes.len(), 2);
    assert!(passes[0]["step"].is_null());
    assert_eq!(passes[1]["step"]["op"], "reveal");
    assert_eq!(passes[1]["range"]["end"], 51);
}

#[test]
fn smoke_rejects_invalid_config() {
    let dir = std::env::temp_dir().join("rowview_smoke_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.toml");
    std::fs::write(&config, "row_count = \"many\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_rowview"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ParseError"), "{}", stderr);
}
