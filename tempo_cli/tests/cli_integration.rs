use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn tempo(record: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tempo_cli").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("TEMPO_SIM_APPLY_FAIL")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(record);
    cmd
}

fn record_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("etc").join("speed.toml")
}

#[rstest]
#[case(&[], 0, "Current game speed: 1.0x (100%)", "stdout")]
#[case(&["show"], 0, "Current game speed: 1.0x (100%)", "stdout")]
#[case(&["set", "2.5"], 0, "[broadcast] Game Speed set to 2.5x (250%)", "stdout")]
#[case(&["set", "0"], 3, "Speed multiplier must be at least 0.01!", "stderr")]
#[case(&["set", "-1"], 3, "Speed multiplier must be at least 0.01!", "stderr")]
#[case(&["set", "11"], 3, "Speed multiplier must not exceed 10.0!", "stderr")]
#[case(&["toggle"], 0, "[broadcast] Game Speed toggled to 0.5x (50%)", "stdout")]
#[case(&["reset"], 0, "[broadcast] Game Speed set to 1.0x (100%)", "stdout")]
#[case(&["increase", "100"], 0, "Speed capped at 10.0x", "stdout")]
#[case(&["d", "100"], 0, "Speed capped at 0.01x", "stdout")]
#[case(&["i"], 0, "Game Speed set to 1.1x (110%)", "stdout")]
#[case(&["set"], 2, "required", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    let assert = tempo(&record).args(args).assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("tempo_cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:").and(predicate::str::contains("toggle")));
}

#[test]
fn speed_survives_restarts() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    tempo(&record).args(["set", "3"]).assert().success();
    let text = fs::read_to_string(&record).unwrap();
    assert!(text.contains("CurrentSpeed = 3.0"), "{text}");
    assert!(text.contains("ToggleTargetSpeed = 3.0"), "{text}");

    tempo(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current game speed: 3.0x (300%)"));

    // 3.0 -> normal -> back to the remembered 3.0
    tempo(&record)
        .arg("toggle")
        .assert()
        .success()
        .stdout(predicate::str::contains("toggled to 1.0x"));
    tempo(&record)
        .arg("toggle")
        .assert()
        .success()
        .stdout(predicate::str::contains("toggled to 3.0x"));
}

#[test]
fn rejected_speed_leaves_no_record() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);
    tempo(&record).args(["set", "50"]).assert().code(3);
    assert!(!record.exists());
}

#[test]
fn apply_failure_is_reported_but_value_is_kept() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    tempo(&record)
        .env("TEMPO_SIM_APPLY_FAIL", "1")
        .args(["set", "3"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains(
            "[broadcast] Failed to apply game speed! Check server logs.",
        ))
        .stdout(predicate::str::contains("Game Speed set to").not());

    let text = fs::read_to_string(&record).unwrap();
    assert!(text.contains("CurrentSpeed = 3.0"), "{text}");
}

#[test]
fn adjust_failure_has_its_own_exit_code() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    tempo(&record)
        .env("TEMPO_SIM_APPLY_FAIL", "1")
        .arg("increase")
        .assert()
        .code(5)
        .stderr(predicate::str::contains(
            "Failed to increase speed: Failed to adjust speed from 1.0 to 1.1",
        ));
}

#[test]
fn corrupted_record_is_healed_on_load() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);
    fs::create_dir_all(record.parent().unwrap()).unwrap();
    fs::write(&record, "MaxSpeed = 0.0\nCurrentSpeed = 2.0\n").unwrap();

    tempo(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current game speed: 2.0x (200%)"));

    let text = fs::read_to_string(&record).unwrap();
    assert!(text.contains("MaxSpeed = 10.0"), "{text}");
}

#[test]
fn each_correction_is_logged_as_a_warning() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);
    fs::create_dir_all(record.parent().unwrap()).unwrap();
    fs::write(&record, "MaxSpeed = 0.0\n").unwrap();

    Command::cargo_bin("tempo_cli")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--log-level")
        .arg("warn")
        .arg("--config")
        .arg(&record)
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid MinSpeed (0.01), resetting to 0.01"))
        .stderr(predicate::str::contains(
            "invalid MaxSpeed (0.0), resetting to 10.0",
        ));
}

#[test]
fn unparsable_record_fails_loudly() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);
    fs::create_dir_all(record.parent().unwrap()).unwrap();
    fs::write(&record, "MaxSpeed = = 3").unwrap();

    tempo(&record)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load speed record"));
}

#[test]
fn json_errors_are_structured() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    let out = tempo(&record)
        .arg("--json")
        .args(["set", "50"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let stderr = String::from_utf8(out.stderr).unwrap();
    let line = stderr
        .lines()
        .rev()
        .find(|l| l.contains("\"reason\""))
        .expect("an error object on stderr");
    let v: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(v["reason"], "InvalidSpeed");
    assert!(
        v["message"]
            .as_str()
            .unwrap()
            .contains("must not exceed 10.0!")
    );
}

#[test]
fn console_routes_each_line() {
    let dir = tempdir().unwrap();
    let record = record_path(&dir);

    assert_cmd::Command::from_std(tempo(&record))
        .arg("console")
        .write_stdin("speed 2\ntoggle\n\nwarp\ni 100\nquit\nset 5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[broadcast] Game Speed set to 2.0x (200%)"))
        .stdout(predicate::str::contains("[broadcast] Game Speed toggled to 1.0x (100%)"))
        .stdout(predicate::str::contains("Current game speed: 1.0x (100%)"))
        .stdout(predicate::str::contains("usage: speed"))
        .stdout(predicate::str::contains("Speed capped at 10.0x"));

    // lines after `quit` are never executed
    let text = fs::read_to_string(&record).unwrap();
    assert!(text.contains("CurrentSpeed = 10.0"), "{text}");
}
