use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docid(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docid").unwrap();
    cmd.arg("--config")
        .arg(config_dir.path().join("config.json"));
    cmd
}

fn init_config(dir: &TempDir) {
    docid(dir).args(["config", "init"]).assert().success();
}

#[test]
fn extract_national_id_from_text_file() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("nid.txt");
    fs::write(&input, "Name: Alice\nDate of Birth\n1 Jan 2000\nID 42\n").unwrap();

    docid(&dir)
        .arg("extract")
        .arg(&input)
        .args(["--kind", "nid"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "success""#))
        .stdout(predicate::str::contains(r#""dob": "1 Jan 2000""#))
        .stdout(predicate::str::contains(r#""nid": "42""#));
}

#[test]
fn extract_reads_ocr_block_json() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("birth.json");
    fs::write(
        &input,
        r#"{"Blocks": [
            {"BlockType": "LINE", "Text": "20011234567890123"},
            {"BlockType": "WORD", "Text": "ignored"},
            {"BlockType": "LINE", "Text": "Date of Birth: 22-09-2001"}
        ]}"#,
    )
    .unwrap();

    docid(&dir)
        .arg("extract")
        .arg(&input)
        .args(["--kind", "birth"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""birthRegistrationNumber": "20011234567890123""#))
        .stdout(predicate::str::contains(r#""dateOfBirth": "2001-09-22""#));
}

#[test]
fn extract_failure_prints_envelope_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("blank.txt");
    fs::write(&input, "Birth Certificate\n22-09-2001\n").unwrap();

    docid(&dir)
        .arg("extract")
        .arg(&input)
        .args(["--kind", "birth"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Birth Registration Number not found."));
}

#[test]
fn extract_passport_as_text_with_check_digits() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("passport.json");
    fs::write(
        &input,
        r#"["P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122F1204159ZE184226B<<<<<10"]"#,
    )
    .unwrap();

    docid(&dir)
        .arg("extract")
        .arg(&input)
        .args(["--kind", "passport", "--format", "text", "--check-digits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passport number: L898902C3"))
        .stdout(predicate::str::contains("Birth date: 12 Aug 1974"))
        .stdout(predicate::str::contains("Check digits: valid"));
}

#[test]
fn extract_builds_verification_request() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("nid.txt");
    fs::write(&input, "Name: Alice\nDate of Birth\n1 Jan 2000\nID 42\n").unwrap();

    docid(&dir)
        .arg("extract")
        .arg(&input)
        .args(["--kind", "nid", "--verification-request"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/v2/verifications/basic-nid"))
        .stdout(predicate::str::contains(r#""person_dob": "2000-01-01""#));
}

#[test]
fn batch_writes_summary_csv() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let inputs = dir.path().join("inputs");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), "20011234567890123\n22-09-2001\n").unwrap();
    fs::write(inputs.join("b.txt"), "nothing useful\n").unwrap();
    let summary = dir.path().join("summary.csv");

    docid(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .args(["--kind", "birth", "--summary"])
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let csv = fs::read_to_string(&summary).unwrap();
    assert!(csv.starts_with("filename,status,status_code,detail"));
    assert!(csv.contains("a.txt,success,200,20011234567890123"));
    assert!(csv.contains("b.txt,fail,404,Birth Registration Number not found."));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    docid(&dir)
        .arg("batch")
        .arg(format!("{}/missing/*.txt", dir.path().display()))
        .args(["--kind", "nid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    docid(&dir)
        .args(["config", "get", "extraction.mrz_century_pivot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));

    docid(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_get_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    docid(&dir)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
