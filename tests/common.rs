#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's config and timezone
pub fn rwd() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("rworkday_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rworkday");
    cmd.env("HOME", &home)
        .env("TZ", "UTC")
        .env("NO_COLOR", "1")
        .env_remove("RWORKDAY_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkday.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh DB with the schema in place
pub fn init_db(db_path: &str) {
    rwd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a command against `db_path` at the fixed instant `now`
pub fn at(db_path: &str, now: &str, args: &[&str]) -> Command {
    let mut cmd = rwd();
    cmd.args(["--db", db_path, "--now", now]).args(args);
    cmd
}

/// One complete day: start 08:00, pause 12:00, resume 13:00, finish 17:30.
pub fn full_day(db_path: &str, date: &str) {
    at(db_path, &format!("{date}T08:00:00+00:00"), &["start", "--date", date])
        .assert()
        .success();
    at(db_path, &format!("{date}T12:00:00+00:00"), &["pause", "--date", date])
        .assert()
        .success();
    at(db_path, &format!("{date}T13:00:00+00:00"), &["start", "--date", date])
        .assert()
        .success();
    at(db_path, &format!("{date}T17:30:00+00:00"), &["finish", "--date", date])
        .assert()
        .success();
}
