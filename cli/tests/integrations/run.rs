use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_run_writes_turtle() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run").arg("m/s").arg("/g");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("@prefix unit: <https://w3id.org/units/> ."))
        .stdout(predicate::str::contains("unit:m.s-1\n"))
        .stdout(predicate::str::contains("rdfs:label \"metre per second\"@en"))
        .stdout(predicate::str::contains("skos:exactMatch QUDT:M-PER-SEC"))
        .stdout(predicate::str::contains("rdfs:label \"reciprocal gram\"@en"));
}

#[test]
fn test_cli_run_json_format() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run").arg("km").arg("--format").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value[0]["ucum_code"], "km");
    assert_eq!(
        value[0]["definition"],
        "A unit which is equal to 10^3 metre."
    );
}

#[test]
fn test_cli_run_skips_unparseable_input() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run").arg("m.furlong").arg("kg");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("unit:kg\n"))
        .stdout(predicate::str::contains("furlong").not())
        .stderr(predicate::str::contains("skipping unit expression"));
}

#[test]
fn test_cli_run_reads_csv_and_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("units.csv");
    let output = temp_dir.path().join("units.ttl");
    fs::write(&input, "m.s-1,speed\ns-1.m,speed again\nhar,area\n\n").unwrap();

    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3 record(s), 0 rejected"));

    let turtle = fs::read_to_string(&output).unwrap();
    assert!(turtle.contains("unit:m.s-1\n"));
    assert!(turtle.contains("rdfs:label \"hectare\"@en"));
    assert_eq!(turtle.matches("unit:ucum_code \"m.s-1\"").count(), 1);
}

#[test]
fn test_cli_run_with_custom_tables_and_mappings() {
    let temp_dir = TempDir::new().unwrap();
    let units = temp_dir.path().join("units.csv");
    let prefixes = temp_dir.path().join("prefixes.csv");
    let exponents = temp_dir.path().join("exponents.csv");
    let mappings = temp_dir.path().join("mappings");
    fs::create_dir(&mappings).unwrap();

    fs::write(
        &units,
        "UCUM_symbol,SI_symbol,label_en,definition_en\nm,m,meter,\ns,s,second,\n",
    )
    .unwrap();
    fs::write(&prefixes, "symbol,label_en,prefix_num\nk,kilo,3\n").unwrap();
    fs::write(&exponents, "power,label_en\n2,square\n").unwrap();
    fs::write(
        mappings.join("local.csv"),
        "IRI,UCUM1\nhttp://example.org/units/kph,km/s\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run")
        .arg("km.s-1")
        .arg("--units")
        .arg(&units)
        .arg("--prefixes")
        .arg(&prefixes)
        .arg("--exponents")
        .arg(&exponents)
        .arg("--mappings")
        .arg(&mappings);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rdfs:label \"kilometer per second\"@en"))
        .stdout(predicate::str::contains(
            "skos:exactMatch <http://example.org/units/kph> .",
        ));
}

#[test]
fn test_cli_run_bad_table_fails() {
    let temp_dir = TempDir::new().unwrap();
    let units = temp_dir.path().join("units.csv");
    let prefixes = temp_dir.path().join("prefixes.csv");
    let exponents = temp_dir.path().join("exponents.csv");
    fs::write(&units, "UCUM_symbol,SI_symbol,label_en\nm,m,meter\n").unwrap();
    fs::write(&prefixes, "symbol,label_en,prefix_num\nk,kilo,thousand\n").unwrap();
    fs::write(&exponents, "power,label_en\n2,square\n").unwrap();

    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run")
        .arg("m")
        .arg("--units")
        .arg(&units)
        .arg("--prefixes")
        .arg(&prefixes)
        .arg("--exponents")
        .arg(&exponents);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Lookup table error"));
}

#[test]
fn test_cli_run_without_units() {
    let mut cmd = Command::cargo_bin("unitcanon").unwrap();
    cmd.arg("run");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No unit expressions given"));
}
