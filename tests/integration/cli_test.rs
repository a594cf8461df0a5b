//! End-to-end tests of the `replay-driver` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's config file and log environment.
fn replay_driver(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("replay-driver").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("none.toml"))
        .env("REPLAY_DRIVER_LOG", "info")
        .env_remove("RUST_LOG");
    cmd
}

fn fast_run(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "run",
        "--headless",
        "--frames",
        "30",
        "--decode-time-ms",
        "0",
        "--gpu-time-ms",
        "0",
    ])
}

#[test]
fn run_reports_measurement_range_on_stdout() {
    let dir = TempDir::new().unwrap();
    let mut cmd = replay_driver(&dir);
    fast_run(&mut cmd)
        .args(["--measurement-range", "10-20", "--quit-after-measurement-range"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Measurement range FPS: "))
        .stdout(predicate::str::contains("10 frames, 1 loop, framerange [10-20)"));
}

#[test]
fn run_clips_range_to_short_capture() {
    let dir = TempDir::new().unwrap();
    let mut cmd = replay_driver(&dir);
    fast_run(&mut cmd)
        .args(["--measurement-range", "10-99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 frames, 1 loop, framerange [10-30)"));
}

#[test]
fn inverted_range_warns_without_report() {
    let dir = TempDir::new().unwrap();
    let mut cmd = replay_driver(&dir);
    fast_run(&mut cmd)
        .args(["--measurement-range", "20-10"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "greater than or equal to the end frame",
        ));
}

#[test]
fn replay_failure_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let mut cmd = replay_driver(&dir);
    fast_run(&mut cmd)
        .args(["--fail-at-frame", "5"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot calculate measurement range FPS"));
}

#[test]
fn measurement_file_is_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let mut cmd = replay_driver(&dir);
    fast_run(&mut cmd)
        .args(["--measurement-range", "0-10", "--quit-after-measurement-range"])
        .arg("--measurement-file")
        .arg(&path)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["frame_count"], 10);
    assert_eq!(json["start_frame"], 0);
    assert_eq!(json["end_frame"], 10);
}

#[test]
fn config_file_values_are_used() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "[playback]\nheadless = true\nquit_after_range = true\n\n[synthetic]\nframes = 8\ndecode_time_ms = 0\ngpu_time_ms = 0\n",
    )
    .unwrap();

    Command::cargo_bin("replay-driver")
        .unwrap()
        .env("REPLAY_DRIVER_LOG", "warn")
        .arg("--config")
        .arg(&config)
        .args(["run", "--measurement-range", "2-6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 frames, 1 loop, framerange [2-6)"));
}

#[test]
fn malformed_range_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    replay_driver(&dir)
        .args(["run", "--measurement-range", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected START-END"));
}

#[test]
fn run_help_lists_measurement_flags() {
    let dir = TempDir::new().unwrap();
    replay_driver(&dir)
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--measurement-range"))
        .stdout(predicate::str::contains("--quit-after-measurement-range"))
        .stdout(predicate::str::contains("--pause-frame"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    replay_driver(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("[synthetic]"));
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    replay_driver(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("replay-driver"));
}
