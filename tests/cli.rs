//! CLI integration tests
//!
//! These run the `gledger` binary against an isolated config directory and
//! an API address nothing listens on, so only input handling and offline
//! commands are exercised.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn gledger(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gledger").unwrap();
    cmd.env("GLEDGER_CONFIG_DIR", config_dir.path())
        .env("GLEDGER_API_URL", UNREACHABLE_API)
        .env_remove("GLEDGER_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Garments ERP"))
        .stdout(predicate::str::contains("trial-balance"))
        .stdout(predicate::str::contains("cashbook"))
        .stdout(predicate::str::contains("journal"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("gledger --help"));
}

#[test]
fn test_config_shows_paths_and_override() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API base URL:   http://127.0.0.1:9"))
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_save_writes_settings() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["config", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let saved = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(saved.contains("http://127.0.0.1:9"));
}

#[test]
fn test_trial_balance_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args([
            "trial-balance",
            "show",
            "--start",
            "2024-13-01",
            "--end",
            "2024-12-31",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid start date '2024-13-01', expected YYYY-MM-DD",
        ));
}

#[test]
fn test_trial_balance_rejects_reversed_range() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["tb", "show", "--start", "2024-02-01", "--end", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Start date must not be later than end date",
        ));
}

#[test]
fn test_trial_balance_rejects_long_range() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["tb", "show", "--start", "2023-01-01", "--end", "2024-06-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed 365 days"));
}

#[test]
fn test_trial_balance_requires_both_dates() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["tb", "show", "--start", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide both --start and --end"));
}

#[test]
fn test_trial_balance_months_is_bounded() {
    let dir = TempDir::new().unwrap();
    for months in ["0", "25", "100000"] {
        gledger(&dir)
            .args(["tb", "show", "--end", "2024-12-31", "--months", months])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"))
            .stderr(predicate::str::contains("--months"));
    }
}

#[test]
fn test_trial_balance_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["tb", "show", "--category", "Inventory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown account category 'Inventory'"));
}

#[test]
fn test_export_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["tb", "export", "--format", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'xlsx'"));
}

#[test]
fn test_journal_rejects_unknown_export_column() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["journal", "export", "--columns", "amount,balance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column 'balance'"));
}

#[test]
fn test_cashbook_rejects_zero_amount() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["cashbook", "credit", "0", "--category", "Sales Revenue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero"));
}

#[test]
fn test_cashbook_import_dry_run() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("cashbook.csv");
    fs::write(
        &sheet,
        "Date,Catagories,Particulars,Amount,Date,Catagories,Supplier,Buyer,Particulars,Amount\n\
         01-02-2025,Loan A/C Chairman,,\"261,080\",,,,,,\n\
         ,,,,02-02-25,Electric Bill,DESCO,,January,\"5,000\"\n\
         03-02-2025,Sales Revenue,Invoice 7,abc,,,,,,\n",
    )
    .unwrap();

    gledger(&dir)
        .args(["cashbook", "import", "--dry-run"])
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entr(ies) ready"))
        .stdout(predicate::str::contains("line 4: Invalid amount 'abc'"));
}

#[test]
fn test_cashbook_import_missing_file() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["cashbook", "import", "--dry-run", "no-such-file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-file.csv"));
}

#[test]
fn test_auth_status_without_token() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_profile_requires_login() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["auth", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gledger auth login"));
}

#[test]
fn test_health_reports_unreachable_api() {
    let dir = TempDir::new().unwrap();
    gledger(&dir)
        .args(["health", "--attempts", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("API is unreachable after 1 attempt(s)"));
}
