use unitcanon::*;

fn engine() -> Engine {
    Engine::builtin().unwrap()
}

#[test]
fn test_end_to_end_metre_per_second() {
    let record = engine().canonicalize("m.s-1").unwrap();

    assert_eq!(record.ucum_code, "m.s-1");
    assert_eq!(record.si_code.as_deref(), Some("m s-1"));
    assert_eq!(record.label.as_deref(), Some("metre per second"));
    assert_eq!(
        record.definition.as_deref(),
        Some("A unit which is equal to 1 metre per 1 second.")
    );

    let turtle = serializers::record_to_turtle(&record);
    assert!(turtle.contains("skos:exactMatch QUDT:M-PER-SEC"));
}

#[test]
fn test_every_spelling_of_newton_metre_agrees() {
    let engine = engine();
    let a = engine.canonicalize("N.m").unwrap();
    let b = engine.canonicalize("m.N").unwrap();
    assert_eq!(a.ucum_code, "m.N");
    assert_eq!(a.ucum_code, b.ucum_code);
    assert_eq!(a.label, b.label);

    // QUDT records "N.m", OM records "m.N"
    let identifiers: Vec<&str> = a.identifiers().collect();
    assert!(identifiers.contains(&"http://qudt.org/vocab/unit/N-M"));
    assert!(identifiers.contains(&"http://www.ontology-of-units-of-measure.org/resource/om-2/newtonMetre"));
}

#[test]
fn test_denominator_only_matches_slash_spelling() {
    let record = engine().canonicalize("/g").unwrap();
    assert_eq!(record.ucum_code, "g-1");
    assert_eq!(record.label.as_deref(), Some("reciprocal gram"));
    assert!(record
        .identifiers()
        .any(|id| id == "http://qudt.org/vocab/unit/PER-GM"));
}

#[test]
fn test_slash_only_vocabulary_spelling() {
    // OM and UO only spell mole per litre as "mol/L"
    let record = engine().canonicalize("mol.L-1").unwrap();
    let identifiers: Vec<&str> = record.identifiers().collect();
    assert!(identifiers.contains(&"http://www.ontology-of-units-of-measure.org/resource/om-2/molePerLitre"));
    assert!(identifiers.contains(&"http://purl.obolibrary.org/obo/UO_0000062"));
}

#[test]
fn test_kilogram() {
    let record = engine().canonicalize("kg").unwrap();
    assert_eq!(record.definition.as_deref(), Some(KILOGRAM_DEFINITION));
    assert_eq!(record.si_code.as_deref(), Some("kg"));
}

#[test]
fn test_kilometre() {
    let record = engine().canonicalize("km").unwrap();
    assert_eq!(
        record.definition.as_deref(),
        Some("A unit which is equal to 10^3 metre.")
    );
}

#[test]
fn test_hectare_and_decare() {
    let engine = engine();
    assert_eq!(
        engine.canonicalize("har").unwrap().label.as_deref(),
        Some("hectare")
    );
    assert_eq!(
        engine.canonicalize("daar").unwrap().label.as_deref(),
        Some("decare")
    );
}

#[test]
fn test_micro_prefix_si_code() {
    let record = engine().canonicalize("Gg/um").unwrap();
    assert_eq!(record.ucum_code, "Gg.um-1");
    assert_eq!(record.si_code.as_deref(), Some("Gg μm-1"));
    assert_eq!(record.label.as_deref(), Some("gigagram per micrometre"));
    assert_eq!(
        record.definition.as_deref(),
        Some("A unit which is equal to 10^9 gram per 10^-6 metre.")
    );
}

#[test]
fn test_unknown_token_yields_no_record() {
    let outcome = engine().process_batch(["m.furlong"]);
    assert!(outcome.is_empty());
    assert_eq!(outcome.rejected.len(), 1);
}

#[test]
fn test_conventional_units() {
    let record = engine().canonicalize("cal/sb").unwrap();
    assert_eq!(record.ucum_code, "cal.sb-1");
    assert_eq!(record.si_code, None);
    assert_eq!(record.label.as_deref(), Some("calorie per stilb"));
}

#[test]
fn test_celsius_is_metric_with_si_symbol() {
    let record = engine().canonicalize("Cel").unwrap();
    assert_eq!(record.si_code.as_deref(), Some("°C"));
    assert_eq!(record.label.as_deref(), Some("degree Celsius"));
}
