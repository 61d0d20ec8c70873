use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("whooweswho-export").unwrap()
}

#[test]
fn url_is_required() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn unresolvable_url_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("expenses.csv");
    cmd()
        .env_remove("WHOOWESWHO_HEADERS")
        .args(["--url", "https://www.whooweswho.net/session", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not extract book/sheet from url: \"https://www.whooweswho.net/session\"",
        ));
    assert!(!output.exists());
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-header"))
        .stdout(predicate::str::contains("--names"))
        .stdout(predicate::str::contains("--headers"));
}
