use assert_cmd::Command;
use predicates::prelude::*;

fn jumpsat() -> Command {
    Command::cargo_bin("jumpsat").expect("binary builds")
}

#[test]
fn reports_satisfiable() {
    jumpsat()
        .write_stdin("p cnf 1 1\n1 0\n")
        .assert()
        .success()
        .stdout("SATISFIABLE\n");
}

#[test]
fn reports_unsatisfiable() {
    jumpsat()
        .write_stdin("p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n")
        .assert()
        .success()
        .stdout("UNSATISFIABLE\n");
}

#[test]
fn tolerates_comments_and_loose_whitespace() {
    jumpsat()
        .write_stdin("c preamble\np cnf 3 3\n  1   2 0\n-1 2\n0\n-2 3 0\n")
        .assert()
        .success()
        .stdout("SATISFIABLE\n");
}

#[test]
fn malformed_header_fails_without_output() {
    jumpsat()
        .write_stdin("p cnf x 1\n1 0\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid header"));
}

#[test]
fn truncated_input_fails_without_output() {
    jumpsat()
        .write_stdin("p cnf 2 2\n1 2 0\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unexpected end of input"));
}
