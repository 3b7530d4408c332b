use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Number of prompts in the onboarding survey
const SURVEY_FIELDS: usize = 42;

fn setup() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("config.json"), r#"{"payment_delay_ms": 0}"#).expect("config");
    dir
}

fn moneyup(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("moneyup").expect("bin");
    cmd.env("MONEYUP_DATA_DIR", dir.path())
        .env_remove("MONEYUP_LOG");
    cmd
}

fn short_id(add_output: &[u8]) -> String {
    let text = String::from_utf8(add_output.to_vec()).expect("utf8");
    text.lines()
        .find_map(|line| line.strip_prefix("Transaction: "))
        .expect("id line")
        .trim()
        .to_string()
}

#[test]
fn categories_lists_catalogue() {
    let dir = setup();
    moneyup(&dir)
        .args(["categories", "--kind", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("salary"))
        .stdout(predicate::str::contains("groceries").not());
}

#[test]
fn fresh_install_starts_at_onboarding() {
    let dir = setup();
    moneyup(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen: onboarding"));

    moneyup(&dir)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("onboarding"));
}

#[test]
fn onboarding_payment_dashboard_flow() {
    let dir = setup();

    moneyup(&dir)
        .arg("onboard")
        .write_stdin("\n".repeat(SURVEY_FIELDS))
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding complete"));

    moneyup(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen: payment"));

    moneyup(&dir)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("payment"));

    moneyup(&dir)
        .args(["pay", "--name", "A", "--email", "alex@example.com"])
        .assert()
        .failure();

    moneyup(&dir)
        .args(["pay", "--name", "Alex Doe", "--email", "alex@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment successful"));

    moneyup(&dir)
        .args(["pay", "--name", "Alex Doe", "--email", "alex@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already unlocked"));

    moneyup(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("€2800.00"))
        .stdout(predicate::str::contains("Monthly salary"));

    moneyup(&dir)
        .args(["reset", "--force"])
        .assert()
        .success();

    moneyup(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen: onboarding"));
}

#[test]
fn onboarding_can_be_resumed() {
    let dir = setup();

    moneyup(&dir)
        .arg("onboard")
        .write_stdin("Alex\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress saved"));

    moneyup(&dir)
        .args(["onboard", "--resume"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2/10"));
}

#[test]
fn transaction_lifecycle() {
    let dir = setup();

    let output = moneyup(&dir)
        .args([
            "txn",
            "add",
            "45,80",
            "Weekly shop",
            "--category",
            "groceries",
            "--date",
            "2025-01-15",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let id = short_id(&output.stdout);
    assert!(id.starts_with("txn-"));

    moneyup(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly shop"))
        .stdout(predicate::str::contains("-€45.80"));

    moneyup(&dir)
        .args(["txn", "edit", &id, "--amount", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-€50.00"));

    moneyup(&dir)
        .args(["txn", "summary", "--from", "2025-01-01", "--to", "2025-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€50.00"))
        .stdout(predicate::str::contains("Groceries"));

    moneyup(&dir)
        .args(["txn", "export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Date,Type,Category,Description,Amount"))
        .stdout(predicate::str::contains("-50.00"));

    moneyup(&dir)
        .args(["txn", "delete", &id, "--force"])
        .assert()
        .success();

    moneyup(&dir)
        .args(["txn", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    moneyup(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn invalid_transactions_are_rejected() {
    let dir = setup();

    moneyup(&dir)
        .args(["txn", "add", "10", "Lottery", "--category", "lottery"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lottery"));

    moneyup(&dir)
        .args(["txn", "add", "0", "Nothing", "--category", "groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    moneyup(&dir)
        .args(["txn", "add", "10", "Pay", "--category", "salary", "--type", "expense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn config_shows_paths() {
    let dir = setup();
    moneyup(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment delay:    0 ms"));
}

#[test]
fn config_init_writes_settings_file() {
    let dir = setup();
    moneyup(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    let written = fs::read_to_string(dir.path().join("config.json")).expect("config");
    assert!(written.contains("\"payment_delay_ms\": 0"));
    assert!(written.contains("\"currency_code\": \"EUR\""));
}

#[test]
fn invalid_date_format_is_rejected() {
    let dir = setup();
    fs::write(dir.path().join("config.json"), r#"{"date_format": "%Q"}"#).expect("config");

    moneyup(&dir)
        .args(["txn", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}
