use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a test database
fn michi_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("michi").expect("Failed to find michi binary");
    cmd.env_remove("MICHI_USER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Create the Kyoto trip and return its ID, read from the creation message.
fn create_kyoto(db_path: &Path) -> String {
    let output = michi_cmd(db_path)
        .args([
            "trip",
            "create",
            "Kyoto Spring",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-03",
            "-l",
            "Gion",
            "-t",
            "60min",
        ])
        .output()
        .expect("Failed to run michi");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Created trip with ID: "))
        .expect("creation message")
        .trim()
        .to_string()
}

#[test]
fn test_cli_create_trip_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    michi_cmd(&db_path)
        .args([
            "trip",
            "create",
            "Lisbon Autumn",
            "--start",
            "2024-10-01",
            "--end",
            "2024-10-05",
            "-l",
            "Alfama",
            "-t",
            "weekly",
            "--weekly-hours",
            "3.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trip with ID:"))
        .stdout(predicate::str::contains("# Lisbon Autumn"))
        .stdout(predicate::str::contains("3.5 hours per week"));
}

#[test]
fn test_cli_create_trip_rejects_reversed_dates() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    michi_cmd(&db_path)
        .args([
            "trip",
            "create",
            "Backwards",
            "--start",
            "2024-01-05",
            "--end",
            "2024-01-01",
            "-l",
            "Nowhere",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("endDate"));
}

#[test]
fn test_cli_list_empty_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    michi_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_no_subcommand_lists_trips() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_kyoto(&db_path);

    michi_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Trips"))
        .stdout(predicate::str::contains("Kyoto Spring"));
}

#[test]
fn test_cli_generate_and_show_schedule() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let trip_id = create_kyoto(&db_path);

    michi_cmd(&db_path)
        .args(["schedule", "generate", &trip_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learning Block").count(3))
        .stdout(predicate::str::contains("10:00"));

    michi_cmd(&db_path)
        .args(["trip", "show", &trip_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Schedule"))
        .stdout(predicate::str::contains("(3 days)"));
}

#[test]
fn test_cli_add_block_outside_trip_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let trip_id = create_kyoto(&db_path);

    michi_cmd(&db_path)
        .args([
            "schedule",
            "add",
            &trip_id,
            "2024-02-01",
            "10:00",
            "Temple visit",
        ])
        .assert()
        .failure();

    michi_cmd(&db_path)
        .args([
            "schedule",
            "add",
            &trip_id,
            "2024-01-02",
            "10:00",
            "Temple visit",
            "-m",
            "90",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added block on 2024-01-02"))
        .stdout(predicate::str::contains("90 min"));
}

#[test]
fn test_cli_unconfirmed_delete_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let trip_id = create_kyoto(&db_path);

    michi_cmd(&db_path)
        .args(["trip", "delete", &trip_id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--confirm"));

    michi_cmd(&db_path)
        .args(["trip", "delete", &trip_id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted trip 'Kyoto Spring'"));

    michi_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_apply_ai_reports_violations() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let trip_id = create_kyoto(&db_path);

    michi_cmd(&db_path)
        .args(["schedule", "apply-ai", &trip_id, "-"])
        .write_stdin(r#"{"days": "soon"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::contains("AI response does not match schema"))
        .stdout(predicate::str::contains("`days`"));
}

#[test]
fn test_cli_prompt_plan_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let trip_id = create_kyoto(&db_path);

    let output = michi_cmd(&db_path)
        .args(["prompt", "plan", &trip_id, "--json"])
        .output()
        .expect("Failed to run michi");
    assert!(output.status.success());

    let messages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let messages = messages.as_array().unwrap();
    assert!(!messages.is_empty());
    assert_eq!(messages[0]["role"], "system");
}

#[test]
fn test_cli_users_are_isolated() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    create_kyoto(&db_path);

    michi_cmd(&db_path)
        .args(["--user", "someone-else", "trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_profile_set_and_show() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    michi_cmd(&db_path)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No learner profile yet"));

    michi_cmd(&db_path)
        .args([
            "profile",
            "set",
            "--name",
            "Aiko",
            "--age",
            "9",
            "--interests",
            "trains,insects",
        ])
        .assert()
        .success();

    michi_cmd(&db_path)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aiko"))
        .stdout(predicate::str::contains("insects"));
}

#[test]
fn test_cli_create_trip_rejects_sub_minute_weekly_budget() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    michi_cmd(&db_path)
        .args([
            "trip",
            "create",
            "Short Week",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-03",
            "-l",
            "Gion",
            "-t",
            "weekly",
            "--weekly-hours",
            "0.05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weeklyHours"));

    michi_cmd(&db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}
