use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{at, init_db, setup_test_db};

const NOON: &str = "2025-03-10T12:00:00+00:00";

#[test]
fn test_prev_next_today() {
    let db_path = setup_test_db("nav_prev_next");
    init_db(&db_path);

    at(&db_path, NOON, &["day", "today"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-10 ==="));

    at(&db_path, NOON, &["day", "prev"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-09 ==="));

    at(&db_path, NOON, &["day", "previous"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-08 ==="));

    at(&db_path, NOON, &["day", "next"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-09 ==="));

    at(&db_path, NOON, &["day", "today"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-10 ==="));
}

#[test]
fn test_goto_crosses_month_and_year() {
    let db_path = setup_test_db("nav_goto");
    init_db(&db_path);

    at(&db_path, NOON, &["day", "goto", "2024-12-31"])
        .assert()
        .success()
        .stdout(contains("=== 2024-12-31 ==="));

    at(&db_path, NOON, &["day", "next"])
        .assert()
        .success()
        .stdout(contains("=== 2025-01-01 ==="));

    at(&db_path, NOON, &["day", "goto", "2024-02-30"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_commands_follow_the_viewed_day() {
    let db_path = setup_test_db("nav_viewed_day");
    init_db(&db_path);

    at(&db_path, NOON, &["day", "goto", "2025-03-05"])
        .assert()
        .success();

    at(&db_path, "2025-03-10T12:00:00+00:00", &["start"])
        .assert()
        .success()
        .stdout(contains("Timesheet running for 2025-03-05"));

    at(&db_path, "2025-03-10T12:00:00+00:00", &["status", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(contains("Not started"));
}

#[test]
fn test_navigating_away_keeps_the_day_running() {
    let db_path = setup_test_db("nav_keeps_running");
    init_db(&db_path);

    at(&db_path, "2025-03-10T08:00:00+00:00", &["start"])
        .assert()
        .success()
        .stdout(contains("2025-03-10"));

    at(&db_path, "2025-03-10T08:30:00+00:00", &["day", "next"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-11 ==="))
        .stdout(contains("Not started"));

    at(&db_path, "2025-03-10T09:00:00+00:00", &["day", "prev"])
        .assert()
        .success()
        .stdout(contains("=== 2025-03-10 ==="))
        .stdout(contains("In progress"))
        .stdout(contains("Worked     : 01:00:00"))
        .stdout(contains("Paused").not());
}
