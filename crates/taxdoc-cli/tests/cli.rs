use assert_cmd::Command;
use predicates::prelude::*;

fn taxdoc() -> Command {
    Command::cargo_bin("taxdoc").unwrap()
}

#[test]
fn compare_prints_both_regimes() {
    taxdoc()
        .args(["compare", "--basic", "1000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Regime"))
        .stdout(predicate::str::contains("New Regime"))
        .stdout(predicate::str::contains("Recommended:"));
}

#[test]
fn compare_json_output_is_parseable() {
    let output = taxdoc()
        .args(["compare", "--basic", "800000", "--80c", "150000", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["input"]["basic_salary"], "800000");
    assert!(parsed["old"]["tax"].is_string());
    assert!(parsed["recommended"].is_string());
}

#[test]
fn compare_monthly_flag_annualizes() {
    // 50000/month basic annualizes to 600000/year.
    taxdoc()
        .args(["compare", "--basic", "50000", "--monthly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("600,000.00"));
}

#[test]
fn compare_csv_output_has_two_regime_rows() {
    let output = taxdoc()
        .args(["compare", "--basic", "500000", "--format", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let rows: Vec<_> = text.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("regime,"));
}

#[test]
fn process_missing_file_fails() {
    taxdoc()
        .args(["process", "/nonexistent/salary.pdf"])
        .assert()
        .failure();
}

#[test]
fn process_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salary.docx");
    std::fs::write(&path, b"not a document").unwrap();

    taxdoc()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("docx"));
}

#[test]
fn advise_without_api_key_fails() {
    let cache_dir = tempfile::tempdir().unwrap();

    taxdoc()
        .env_remove("PERPLEXITY_API_KEY")
        .env("XDG_CACHE_HOME", cache_dir.path())
        .args(["advise", "--basic", "1000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PERPLEXITY_API_KEY"));
}

#[test]
fn config_path_prints_location() {
    taxdoc()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn config_init_and_show_round_trip() {
    let config_dir = tempfile::tempdir().unwrap();

    taxdoc()
        .env("XDG_CONFIG_HOME", config_dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    taxdoc()
        .env("XDG_CONFIG_HOME", config_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prefer_embedded_text"));
}
