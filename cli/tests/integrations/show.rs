use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_show_breaks_down_expression() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("show").arg("kg/m/s2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kg.m-1.s-2"))
        .stdout(predicate::str::contains("kilogram per metre square second"))
        .stdout(predicate::str::contains("Exponent"));
}

#[test]
fn test_show_reports_parse_error() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("show").arg("m.furlong");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized input 'furlong'"));
}
