use assert_cmd::Command;

#[test]
fn test_interactive_mode_help() {
    // Interactive mode needs a terminal, so only check that the command exists
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("interactive").arg("--help");

    let output = cmd.assert().success();
    output.stdout(predicates::str::contains("--mappings"));
}
