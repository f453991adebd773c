//! Integration tests for the voxtrim binary.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use common::{sine_wav, two_second_recording, u32_at, write_fixture};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config file and environment overrides.
fn voxtrim(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("voxtrim");
    cmd.env_remove("VOXTRIM_EFFECT")
        .env_remove("VOXTRIM_WAVEFORM_WIDTH")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_process_writes_trimmed_wav() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "take.wav", &two_second_recording());
    let output = dir.path().join("edited.wav");

    voxtrim(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--start", "25", "--end", "75", "--effect", "warm", "-q"])
        .assert()
        .success();

    let wav = std::fs::read(&output).unwrap();
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(&wav, 40), 88_200);
}

#[test]
fn test_process_rejects_handles_too_close() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "take.wav", &sine_wav(8_000, 1, 800, 0.3));
    let output = dir.path().join("edited.wav");

    voxtrim(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--start", "40", "--end", "40.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be more than 1% before"));

    assert!(!output.exists());
}

#[test]
fn test_process_rejects_pitch_effect() {
    let dir = TempDir::new().unwrap();

    voxtrim(&dir)
        .args(["process", "in.mp3", "-o", "out.wav", "--effect", "pitch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown effect"));
}

#[test]
fn test_process_falls_back_to_original_by_default() {
    let dir = TempDir::new().unwrap();
    let garbage = b"not a recording at all".to_vec();
    let input = write_fixture(dir.path(), "broken.m4a", &garbage);
    let output = dir.path().join("out.wav");

    voxtrim(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::contains("keeping original recording"));

    assert_eq!(std::fs::read(&output).unwrap(), garbage);
}

#[test]
fn test_process_without_fallback_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "broken.m4a", b"not a recording");
    let output = dir.path().join("out.wav");

    voxtrim(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--no-fallback")
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode failed"));

    assert!(!output.exists());
}

#[test]
fn test_process_missing_input() {
    let dir = TempDir::new().unwrap();

    voxtrim(&dir)
        .arg("process")
        .arg(dir.path().join("missing.mp3"))
        .arg("-o")
        .arg(dir.path().join("out.wav"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn test_config_file_sets_default_effect() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[defaults]\neffect = \"storyteller\"\nfallback = false\n",
    )
    .unwrap();
    // Storyteller cannot run at 4 kHz, so the configured effect is observable.
    let input = write_fixture(dir.path(), "low.wav", &sine_wav(4_000, 1, 400, 0.3));

    voxtrim(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.wav"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("effect failed"));
}

#[test]
fn test_waveform_prints_json_points() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "take.wav", &sine_wav(8_000, 1, 8_000, 0.5));

    let assert = voxtrim(&dir)
        .arg("waveform")
        .arg(&input)
        .args(["--width", "16", "-q"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let points: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(points.len(), 16);
    for point in &points {
        let min = point["min"].as_f64().unwrap();
        let max = point["max"].as_f64().unwrap();
        assert!(min <= max);
    }
}

#[test]
fn test_waveform_width_from_env() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "take.wav", &sine_wav(8_000, 1, 800, 0.5));
    let output = dir.path().join("wave.json");

    voxtrim(&dir)
        .env("VOXTRIM_WAVEFORM_WIDTH", "5")
        .arg("waveform")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let points: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(points.len(), 5);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[waveform]\nwidth = 0\n").unwrap();
    let input = write_fixture(dir.path(), "take.wav", &sine_wav(8_000, 1, 800, 0.5));

    voxtrim(&dir)
        .arg("waveform")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("waveform.width"));
}

#[test]
fn test_config_init_show_and_path() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    voxtrim(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    voxtrim(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config_path.exists());

    voxtrim(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("effect = \"none\""))
        .stdout(predicate::str::contains("width = 800"));

    voxtrim(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
