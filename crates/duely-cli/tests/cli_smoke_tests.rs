use std::path::Path;

use assert_cmd::Command;
use chrono::{Datelike, Duration, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::tempdir;

fn duely(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("duely").expect("binary exists");
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn listing_an_empty_book_shows_no_items() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["list", "--month", "2030-01"])
        .assert()
        .success()
        .stdout(contains("January 2030"))
        .stdout(contains("No items"));
}

#[test]
fn out_of_range_month_is_rejected_not_crashed() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["list", "--month", "9999999-01"])
        .assert()
        .code(2)
        .stderr(contains("year must be between"));
}

#[test]
fn added_bills_show_up_in_their_month() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["add", "Rent", "2400", "--day", "1"])
        .assert()
        .success()
        .stdout(contains("added Rent"));

    duely(dir.path())
        .args(["add", "Insurance", "980,50", "--date", "2030-03-15"])
        .assert()
        .success();

    duely(dir.path())
        .args(["list", "--month", "2030-03"])
        .assert()
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("Insurance"))
        .stdout(contains("980.50"));

    // The one-off stays out of other months.
    duely(dir.path())
        .args(["list", "--month", "2030-04"])
        .assert()
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("Insurance").not());
}

#[test]
fn alert_exit_code_tracks_urgent_bills() {
    let dir = tempdir().expect("tempdir");
    let due = Local::now().date_naive() + Duration::days(2);
    let due_month = format!("{:04}-{:02}", due.year(), due.month());

    duely(dir.path())
        .args(["add", "Tax", "350", "--date", &due.to_string()])
        .assert()
        .success();

    duely(dir.path())
        .arg("alert")
        .assert()
        .code(1)
        .stdout(contains("unpaid bills due within"));

    duely(dir.path())
        .args(["pay", "Tax", "--month", &due_month])
        .assert()
        .success();

    duely(dir.path())
        .arg("alert")
        .assert()
        .success()
        .stdout(contains("no urgent bills"));
}

#[test]
fn settings_round_trip_through_set_and_settings() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["set", "--alert-days", "5", "--currency", "eur"])
        .assert()
        .success();

    duely(dir.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(contains("alert_days: 5"))
        .stdout(contains("currency: EUR"));
}

#[test]
fn remove_drops_the_template() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["add", "Gym", "120", "--day", "5"])
        .assert()
        .success();

    duely(dir.path())
        .args(["remove", "Gym"])
        .assert()
        .success()
        .stdout(contains("removed Gym"));

    duely(dir.path())
        .args(["list", "--month", "2030-01"])
        .assert()
        .success()
        .stdout(contains("Gym").not());
}

#[test]
fn unknown_template_fails_with_an_error() {
    let dir = tempdir().expect("tempdir");

    duely(dir.path())
        .args(["pay", "nothing-here"])
        .assert()
        .code(2)
        .stderr(contains("no template matching"));
}
