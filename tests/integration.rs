//! Integration tests for zipforce

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicBool;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{AesMode, CompressionMethod, ZipWriter};

use zipforce::{
    plan_generator, AttackDriver, AttackSettings, AttackStatus, CandidatePlan, CharsetSpec,
    ZipForceError, ZipPasswordTester,
};

fn write_protected_zip(path: &Path, password: &'static str) {
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .with_aes_encryption(AesMode::Aes128, password);
    writer.start_file("flag.txt", options).unwrap();
    writer.write_all(b"lab flag").unwrap();
    writer.finish().unwrap();
}

fn digits_plan(length: usize) -> CandidatePlan {
    CandidatePlan {
        length,
        charset: CharsetSpec::new(true, false, false, false),
    }
}

fn zipforce() -> Command {
    let mut cmd = Command::cargo_bin("zipforce").unwrap();
    cmd.env_remove("ZIPFORCE_ZIP_FILE")
        .env_remove("ZIPFORCE_MAX_ATTEMPTS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_attack_finds_password_after_exact_attempts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lab.zip");
    write_protected_zip(&path, "017");

    let generator = plan_generator(&digits_plan(3), Some(1000)).unwrap();
    let tester = ZipPasswordTester::open(&path).unwrap();
    let settings = AttackSettings {
        max_attempts: Some(1000),
        progress_interval: 5,
    };
    let mut driver = AttackDriver::new(tester, settings).unwrap();

    let mut observations = 0;
    let report = driver
        .run(generator, &AtomicBool::new(false), |_| observations += 1)
        .unwrap();

    assert_eq!(report.status, AttackStatus::Succeeded);
    // "017" is candidate number 18 in counting order
    assert_eq!(report.attempts, 18);
    assert_eq!(report.credentials.unwrap().password, "017");
    assert_eq!(observations, 4);
}

#[test]
fn test_attack_exhausts_at_cap() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lab.zip");
    write_protected_zip(&path, "999");

    let generator = plan_generator(&digits_plan(3), Some(25)).unwrap();
    let tester = ZipPasswordTester::open(&path).unwrap();
    let settings = AttackSettings {
        max_attempts: Some(25),
        ..Default::default()
    };
    let mut driver = AttackDriver::new(tester, settings).unwrap();
    let report = driver.run(generator, &AtomicBool::new(false), |_| {}).unwrap();

    assert_eq!(report.status, AttackStatus::Exhausted);
    assert_eq!(report.attempts, 25);
    assert!(report.credentials.is_none());
}

#[test]
fn test_empty_charset_fails_before_enumeration() {
    let plan = CandidatePlan {
        length: 4,
        charset: CharsetSpec::default(),
    };
    let err = plan_generator(&plan, Some(10)).unwrap_err();
    assert!(matches!(err, ZipForceError::Config { .. }));
}

#[test]
fn test_invalid_numbers_rejected() {
    assert!(plan_generator(&digits_plan(0), Some(10)).is_err());
    assert!(plan_generator(&digits_plan(2), Some(0)).is_err());
}

#[test]
fn test_cli_declined_terms_abort() {
    zipforce()
        .args(["--mode", "password_only", "--dry-run", "--password-digits"])
        .write_stdin("no\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("LEGAL NOTICE"))
        .stdout(predicate::str::contains("Legal terms not accepted. Exiting."))
        .stdout(predicate::str::contains("DRY RUN").not());
}

#[test]
fn test_cli_dry_run_prints_strategy() {
    zipforce()
        .args([
            "--mode",
            "password_only",
            "--dry-run",
            "--password-length",
            "2",
            "--password-digits",
        ])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSWORD GENERATION"))
        .stdout(predicate::str::contains("Character set: 0123456789"))
        .stdout(predicate::str::contains("Total combinations: 100"))
        .stdout(predicate::str::contains("- 00"))
        .stdout(predicate::str::contains("- 04"))
        .stdout(predicate::str::contains("- 05").not())
        .stdout(predicate::str::contains("USERNAME GENERATION").not());
}

#[test]
fn test_cli_dry_run_both_roles() {
    zipforce()
        .args([
            "--mode",
            "both",
            "--dry-run",
            "--username-lower",
            "--password-digits",
        ])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("USERNAME GENERATION"))
        .stdout(predicate::str::contains("PASSWORD GENERATION"));
}

#[test]
fn test_cli_empty_charset_is_config_error() {
    zipforce()
        .args(["--mode", "password_only", "--dry-run"])
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one character type must be selected"));
}

#[test]
fn test_cli_missing_archive() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.zip");

    zipforce()
        .args(["--mode", "password_only", "--password-digits", "--zip-file"])
        .arg(&missing)
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_username_mode_not_faked() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lab.zip");
    write_protected_zip(&path, "12");

    zipforce()
        .args(["--mode", "username_only", "--username-lower", "--zip-file"])
        .arg(&path)
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("only take a password"));
}

#[test]
fn test_cli_cracks_and_extracts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lab.zip");
    let out = dir.path().join("out");
    write_protected_zip(&path, "42");

    zipforce()
        .args([
            "--mode",
            "password_only",
            "--password-length",
            "2",
            "--password-digits",
            "--zip-file",
        ])
        .arg(&path)
        .arg("--extract-to")
        .arg(&out)
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS! Found password: '42'"))
        .stdout(predicate::str::contains("Total attempts: 43"));

    assert_eq!(std::fs::read(out.join("flag.txt")).unwrap(), b"lab flag");
}

#[test]
fn test_cli_reports_exhaustion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lab.zip");
    write_protected_zip(&path, "zz");

    zipforce()
        .args([
            "--mode",
            "password_only",
            "--password-length",
            "2",
            "--password-digits",
            "--max-attempts",
            "10",
            "--json",
            "--zip-file",
        ])
        .arg(&path)
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Max attempts reached: 10"))
        .stdout(predicate::str::contains("Failed to crack the ZIP file"))
        .stdout(predicate::str::contains("\"status\": \"exhausted\""))
        .stdout(predicate::str::contains("\"Exact\": 10"));
}
