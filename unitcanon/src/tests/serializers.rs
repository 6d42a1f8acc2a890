use crate::serializers::{document_header, record_to_turtle, to_json, to_turtle};
use crate::Engine;

fn record(input: &str) -> crate::UnitRecord {
    Engine::builtin().unwrap().canonicalize(input).unwrap()
}

#[test]
fn test_record_block_layout() {
    let turtle = record_to_turtle(&record("m/s"));
    let lines: Vec<&str> = turtle.lines().collect();

    assert_eq!(lines[0], "unit:m.s-1");
    assert_eq!(lines[1], "  a owl:NamedIndividual ;");
    assert_eq!(lines[2], "  rdfs:label \"metre per second\"@en ;");
    assert_eq!(
        lines[3],
        "  IAO:0000115 \"A unit which is equal to 1 metre per 1 second.\"@en ;"
    );
    assert_eq!(lines[4], "  unit:SI_code \"m s-1\" ;");
    assert_eq!(lines[5], "  unit:ucum_code \"m.s-1\" ;");
    assert!(lines.contains(&"  skos:exactMatch QUDT:M-PER-SEC ;"));
    assert!(lines.contains(&"  skos:exactMatch OM:metrePerSecond-Time ;"));
    assert!(lines.last().unwrap().ends_with(" ."));
    assert_eq!(lines.iter().filter(|l| l.ends_with(" .")).count(), 1);
}

#[test]
fn test_every_builtin_vocabulary_is_compacted() {
    let turtle = record_to_turtle(&record("m.s-1"));
    for curie in [
        "OM:metrePerSecond-Time",
        "QUDT:M-PER-SEC",
        "UO:0000094",
        "OBOE:MeterPerSecond",
        "NERC_P06:UVAA",
    ] {
        assert!(turtle.contains(&format!("skos:exactMatch {}", curie)), "{}", turtle);
    }
    assert!(!turtle.contains('<'), "{}", turtle);
}

#[test]
fn test_subject_is_percent_encoded() {
    let turtle = record_to_turtle(&record("[degF]"));
    assert!(turtle.starts_with("unit:%5BdegF%5D\n"), "{}", turtle);
    assert!(turtle.contains("unit:ucum_code \"[degF]\""));
}

#[test]
fn test_absent_fields_are_skipped() {
    let turtle = record_to_turtle(&record("[ft_i]/s"));
    assert!(!turtle.contains("unit:SI_code"));
    assert!(turtle.contains("rdfs:label \"international foot per second\"@en"));
}

#[test]
fn test_document_header() {
    let header = document_header();
    assert!(header.starts_with("@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n"));
    assert!(header.contains("@prefix unit: <https://w3id.org/units/> .\n"));
    assert!(header.contains("@prefix NERC_P06: <http://vocab.nerc.ac.uk/collection/P06/current/> .\n"));
    assert!(header.contains("IAO:0000115 a rdf:Property ;\n\trdfs:label \"definition\" .\n"));
}

#[test]
fn test_document_contains_every_record() {
    let records = vec![record("m"), record("kg")];
    let turtle = to_turtle(&records);
    assert!(turtle.starts_with(&document_header()));
    assert!(turtle.contains("\nunit:m\n"));
    assert!(turtle.contains("\nunit:kg\n"));
}

#[test]
fn test_document_writes_each_subject_once() {
    let records = vec![record("m/s"), record("s-1.m"), record("kg")];
    let turtle = to_turtle(&records);
    assert_eq!(turtle.matches("\nunit:m.s-1\n").count(), 1);
    assert_eq!(turtle.matches("\nunit:kg\n").count(), 1);

    let json = to_json(&records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[1]["input"], "s-1.m");
}

#[test]
fn test_json_output() {
    let json = to_json(&[record("/g")]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["ucum_code"], "g-1");
    assert_eq!(value[0]["label"], "reciprocal gram");
    assert_eq!(value[0]["factors"][0]["exponent"], -1);
    assert_eq!(value[0]["factors"][0]["class"], "metric");
    assert!(value[0].get("si_code").is_some());
}
