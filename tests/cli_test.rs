mod common;

use assert_cmd::Command;
use common::*;

#[test]
fn test_check_runs_to_completion_on_empty_exercise() {
    let dir = ExerciseDir::new();
    let output = Command::cargo_bin("kubegrade")
        .unwrap()
        .args(["check", "--plain"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0/75 points (0%)"));
    assert!(stdout.contains("[ ] Deployment file exists - File not found"));
}

#[test]
fn test_check_scores_complete_exercise() {
    let dir = ExerciseDir::with_complete_manifests();
    let output = Command::cargo_bin("kubegrade")
        .unwrap()
        .args(["check", "--plain"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("75/75 points (100%)"));
    assert!(stdout.contains("All manifests complete!"));
}

#[test]
fn test_check_json_output_to_file() {
    let dir = ExerciseDir::with_complete_manifests();
    let report_path = dir.path().join("report.json");

    let output = Command::cargo_bin("kubegrade")
        .unwrap()
        .args(["check", "--format", "json", "--output"])
        .arg(&report_path)
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let payload = std::fs::read_to_string(&report_path).unwrap();
    let report: kubegrade::Report = serde_json::from_str(&payload).unwrap();
    assert_eq!(report.total_points, 75);
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    let dir = ExerciseDir::new();

    let output = Command::cargo_bin("kubegrade")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(dir.path().join("kubegrade.toml").is_file());

    let again = Command::cargo_bin("kubegrade")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!again.status.success());

    let forced = Command::cargo_bin("kubegrade")
        .unwrap()
        .args(["init", "--force"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(forced.status.success());
}
