use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"));
}

#[test]
fn test_server_rejects_partial_table_set() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("server").arg("--units").arg("units.csv");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("--prefixes"));
}
