use assert_cmd::Command;
use predicates::prelude::*;

fn write_budget_csv(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("budget.csv");
    let content = "\
Fiscal Year,Accounting Date,Account,Description,Amount
2024,01/15/2024,6000,Office supplies,\"1,234.5\"
2024,01/16/2024,6100,Travel,250
";
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_upload_dry_run_previews_cleaned_data() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_budget_csv(dir.path());

    Command::cargo_bin("ledgerload")
        .unwrap()
        .args(["upload", csv.to_str().unwrap(), "--table", "manual_budget", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows cleaned"))
        .stdout(predicate::str::contains("rad_data"));
}

#[test]
fn test_check_warns_on_missing_trial_balance_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tb.csv");
    std::fs::write(&path, "Account,Debit\n1000,10.00\n").unwrap();

    Command::cargo_bin("ledgerload")
        .unwrap()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing expected columns"))
        .stdout(predicate::str::contains("description"))
        .stdout(predicate::str::contains("credit"));
}

#[test]
fn test_check_accepts_complete_trial_balance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tb.csv");
    std::fs::write(
        &path,
        "Account,Description,Debit,Credit\n1000,Cash,10.00,\n",
    )
    .unwrap();

    Command::cargo_bin("ledgerload")
        .unwrap()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All expected columns present"));
}

#[test]
fn test_upload_unknown_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_budget_csv(dir.path());

    Command::cargo_bin("ledgerload")
        .unwrap()
        .args(["upload", csv.to_str().unwrap(), "--table", "trial_balance", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown table: trial_balance"));
}

#[test]
fn test_upload_missing_columns_fails_with_full_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "Account,Amount\n6000,10\n").unwrap();

    Command::cargo_bin("ledgerload")
        .unwrap()
        .args(["upload", path.to_str().unwrap(), "--table", "manual_budget", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing columns"))
        .stderr(predicate::str::contains("fiscal_year"))
        .stderr(predicate::str::contains("accounting_date"))
        .stderr(predicate::str::contains("description"));
}
