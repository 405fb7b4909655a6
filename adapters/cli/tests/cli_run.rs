use std::{fs, process::Command};

fn bike_runner() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bike-runner"))
}

#[test]
fn crash_records_initials_in_score_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let scores = dir.path().join("scores.json");

    let output = bike_runner()
        .args(["--seed", "11", "--seconds", "60", "--no-autopilot", "--initials", "TST"])
        .arg("--scores")
        .arg(&scores)
        .output()
        .expect("failed to launch bike-runner");

    assert!(
        output.status.success(),
        "bike-runner failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crashed"), "unexpected report: {stdout}");
    assert!(stdout.contains("TST"), "leaderboard should list the run: {stdout}");

    let stored = fs::read_to_string(&scores).expect("score file written");
    assert!(stored.contains("TST"), "score file: {stored}");
}

#[test]
fn malformed_tuning_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let tuning = dir.path().join("tuning.toml");
    fs::write(&tuning, "seed = \"not a number\"").expect("writable");

    let output = bike_runner()
        .arg("--tuning")
        .arg(&tuning)
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .output()
        .expect("failed to launch bike-runner");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse tuning file"), "stderr: {stderr}");
}

#[test]
fn non_finite_tuning_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let tuning = dir.path().join("tuning.toml");
    fs::write(&tuning, "[spawning]\nplatform_probability = nan\n").expect("writable");

    let output = bike_runner()
        .arg("--tuning")
        .arg(&tuning)
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .output()
        .expect("failed to launch bike-runner");

    assert!(!output.status.success(), "NaN tuning must fail before the run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("platform_probability"), "stderr: {stderr}");
}

#[test]
fn invalid_initials_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = bike_runner()
        .args(["--initials", "TOOLONG"])
        .arg("--scores")
        .arg(dir.path().join("scores.json"))
        .output()
        .expect("failed to launch bike-runner");

    assert!(!output.status.success(), "long initials must fail");
}
