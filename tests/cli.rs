use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn relocate(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relocate").unwrap();
    cmd.env("RELOCATE_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn config_shows_data_directory() {
    let dir = TempDir::new().unwrap();

    relocate(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("Autosave:             true"));
}

#[test]
fn empty_store_has_no_answers_or_drafts() {
    let dir = TempDir::new().unwrap();

    relocate(&dir)
        .arg("answers")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not submitted)"));

    relocate(&dir)
        .args(["drafts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No drafts saved."));
}

#[test]
fn wizard_quit_keeps_draft() {
    let dir = TempDir::new().unwrap();

    relocate(&dir)
        .args(["wizard", "--step", "family"])
        .write_stdin("yes\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2 of 6: Family"));

    relocate(&dir)
        .args(["drafts", "show", "family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasPartner\": \"Yes\""));

    relocate(&dir)
        .args(["drafts", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 draft(s)."));
}

#[test]
fn wizard_submission_is_exported() {
    let dir = TempDir::new().unwrap();

    relocate(&dir)
        .args(["wizard", "--step", "ancestry"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All steps complete."));

    relocate(&dir)
        .args(["export", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hasAncestry:"));

    relocate(&dir)
        .args(["activity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SUBMITTED"));
}

#[test]
fn unknown_step_is_rejected() {
    let dir = TempDir::new().unwrap();

    relocate(&dir)
        .args(["drafts", "show", "pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown step: pets"));
}
