//! Runs the hos-logbook binary against an isolated config directory

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hos-logbook"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("HOS_MAPBOX_TOKEN")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hos-logbook")
}

#[test]
fn test_logs_json_output() {
    let home = tempdir().unwrap();
    let out = run(
        home.path(),
        &[
            "logs",
            "--duration",
            "25",
            "--pickup",
            "39.7392,-104.9903",
            "--dropoff",
            "32.7767,-96.797",
            "--start-date",
            "2025-06-30",
            "--truck",
            "TRK-9",
            "-f",
            "json",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json: Value = serde_json::from_slice(&out.stdout).unwrap();
    let days = json["trip_logs"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"], "2025-06-30");
    assert_eq!(days[0]["from_location"], "39.7392,-104.9903");
    assert_eq!(days[2]["driving_hours"], 3.0);
    assert_eq!(days[1]["truck_or_tractor_trailer_numbers"], "TRK-9");
    assert_eq!(json["summary"]["outcome"], "completed");
    assert_eq!(json["approach_hours"], 0.0);
    assert!(json["routes"].as_array().unwrap().is_empty());
}

#[test]
fn test_cycle_limit_reached_exits_cleanly() {
    let home = tempdir().unwrap();
    let out = run(
        home.path(),
        &[
            "logs",
            "--duration",
            "8",
            "--cycle",
            "70",
            "--pickup",
            "40,-75",
            "--dropoff",
            "41,-76",
        ],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Cycle limit already reached"));
}

#[test]
fn test_invalid_location_fails() {
    let home = tempdir().unwrap();
    let out = run(
        home.path(),
        &["logs", "--duration", "8", "--pickup", "40", "--dropoff", "41,-76"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error: "));
}

#[test]
fn test_save_then_export_csv() {
    let home = tempdir().unwrap();
    let saved = home.path().join("trip.json");
    let out = run(
        home.path(),
        &[
            "logs",
            "--duration",
            "5",
            "--pickup",
            "40,-75",
            "--dropoff",
            "41,-76",
            "--start-date",
            "2025-01-02",
            "--save",
            saved.to_str().unwrap(),
        ],
    );
    assert!(out.status.success());
    assert!(saved.exists());

    let out = run(home.path(), &["export", saved.to_str().unwrap(), "--csv"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let csv = std::fs::read_to_string(home.path().join("trip.csv")).unwrap();
    assert_eq!(csv.lines().count(), 25);
    assert!(csv.lines().nth(1).unwrap().starts_with("2025-01-02,0,2,Driving,"));
}

#[test]
fn test_config_set_and_show() {
    let home = tempdir().unwrap();
    let out = run(home.path(), &["config", "--set-cycle-rule", "60", "--set-carrier", "Prairie Haulers"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Configuration updated"));

    let out = run(home.path(), &["config", "--show"]);
    let shown = String::from_utf8_lossy(&out.stdout);
    assert!(shown.contains("60-hour/7-day"));
    assert!(shown.contains("Prairie Haulers"));
}

#[test]
fn test_logs_rejects_non_finite_duration() {
    let home = tempdir().unwrap();
    let out = run(
        home.path(),
        &["logs", "--duration", "inf", "--pickup", "40,-75", "--dropoff", "41,-76"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid input"));
}
