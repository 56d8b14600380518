//! CLI integration tests for the keyrig binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn keyrig() -> Command {
    Command::cargo_bin("keyrig").unwrap()
}

#[test]
fn test_info_lists_parts_and_clips() {
    keyrig()
        .arg("info")
        .arg(fixture("goose_rig.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: goose"))
        .stdout(predicate::str::contains("Bones: 7"))
        .stdout(predicate::str::contains("Sample mode: lerp"))
        .stdout(predicate::str::contains("neck"))
        .stdout(predicate::str::contains("walk"));
}

#[test]
fn test_validate_accepts_complete_rig() {
    keyrig()
        .arg("validate")
        .arg(fixture("goose_rig.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_rejects_content_gaps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gappy.json");
    fs::write(
        &path,
        r#"{
            "name": "gappy",
            "parts": ["root", "tail"],
            "clips": [{ "name": "idle", "start": 0, "end": 4 }],
            "keyframes": [
                { "frame": 0, "part": "root" },
                { "frame": 2, "part": "tail" }
            ]
        }"#,
    )
    .unwrap();

    keyrig()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("bone 1 (tail)"))
        .stderr(predicate::str::contains("1 content issue"));
}

#[test]
fn test_validate_rejects_oversized_rig() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.json");
    let parts: Vec<String> = (0..13).map(|i| format!("\"p{i}\"")).collect();
    fs::write(
        &path,
        format!(r#"{{ "name": "big", "parts": [{}] }}"#, parts.join(",")),
    )
    .unwrap();

    keyrig()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeding the per-character capacity"));
}

#[test]
fn test_pose_midpoint_with_attachment() {
    keyrig()
        .args(["pose"])
        .arg(fixture("goose_rig.json"))
        .args([
            "--state",
            "idle",
            "--progress",
            "0.5",
            "--attach-bone",
            "1",
            "--attach-offset",
            "0,2,0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frame 5 -> 6"))
        .stdout(predicate::str::contains("(5.000, 0.000, 0.000)"))
        .stdout(predicate::str::contains(
            "Attachment on bone 1 (head): (0.000, 7.000, 0.000)",
        ));
}

#[test]
fn test_pose_held_mode_json() {
    let output = keyrig()
        .args(["pose"])
        .arg(fixture("goose_rig.json"))
        .args(["--state", "0", "--progress", "0.5", "--mode", "held", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "held");
    assert_eq!(report["current_frame"], 5);
    assert_eq!(report["bones"][0]["part"], "body");
    assert_eq!(report["bones"][0]["position"][0], 0.0);
    assert!(report["attachment"].is_null());
}

#[test]
fn test_pose_rejects_unknown_state_and_bad_bone() {
    keyrig()
        .args(["pose"])
        .arg(fixture("goose_rig.json"))
        .args(["--state", "fly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no clip named 'fly'"));

    keyrig()
        .args(["pose"])
        .arg(fixture("goose_rig.json"))
        .args(["--state", "idle", "--attach-bone", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot attach to bone 7"));
}

#[test]
fn test_export_writes_reloadable_document() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("goose_full.json");

    keyrig()
        .arg("export")
        .arg(fixture("goose_rig.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let exported = fs::read_to_string(&out).unwrap();
    assert!(exported.contains("\"parts\""));
    assert!(exported.contains("\"sample_mode\": \"lerp\""));

    keyrig().arg("validate").arg(&out).assert().success();
}

#[test]
fn test_layouts_lists_builtins() {
    keyrig()
        .arg("layouts")
        .assert()
        .success()
        .stdout(predicate::str::contains("goose (7 parts, lerp, z-up)"))
        .stdout(predicate::str::contains("character (12 parts, held, z-up)"));
}

#[test]
fn test_verbose_flag_raises_log_level() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("goose_full.json");

    keyrig()
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg("export")
        .arg(fixture("goose_rig.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote rig 'goose'"));

    keyrig()
        .env_remove("RUST_LOG")
        .arg("export")
        .arg(fixture("goose_rig.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote rig").not());
}

#[test]
fn test_debug_verbosity_shows_library_logs() {
    keyrig()
        .env_remove("RUST_LOG")
        .arg("-vv")
        .arg("info")
        .arg(fixture("goose_rig.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded rig 'goose'"));
}

#[test]
fn test_library_cli_parses_global_verbosity() {
    use clap::Parser;
    use keyrig::cli::{Cli, Commands};

    let cli = Cli::try_parse_from(["keyrig", "-vv", "layouts"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(!cli.quiet);
    assert!(matches!(cli.command, Commands::Layouts));
}
