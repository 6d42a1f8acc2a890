use unitcanon::{CanonError, Engine, ResourceLimits};

fn engine_with(limits: ResourceLimits) -> Engine {
    Engine::builtin().unwrap().with_limits(limits)
}

#[test]
fn test_default_limits() {
    let limits = ResourceLimits::default();
    assert_eq!(limits.max_input_bytes, 256);
    assert_eq!(limits.max_factors, 6);
}

#[test]
fn test_input_length_limit() {
    let engine = engine_with(ResourceLimits {
        max_input_bytes: 10,
        ..ResourceLimits::default()
    });

    match engine.canonicalize("kg.m2.s-3.A-1") {
        Err(CanonError::ResourceLimitExceeded {
            limit_name,
            actual_value,
            ..
        }) => {
            assert_eq!(limit_name, "max_input_bytes");
            assert_eq!(actual_value, "13");
        }
        other => panic!("Expected ResourceLimitExceeded error, got {:?}", other),
    }
}

#[test]
fn test_surrounding_whitespace_does_not_count() {
    let engine = engine_with(ResourceLimits {
        max_input_bytes: 5,
        ..ResourceLimits::default()
    });
    assert!(engine.canonicalize("      m.s-1     ").is_ok());
}

#[test]
fn test_default_factor_limit_allows_six() {
    let engine = Engine::builtin().unwrap();
    assert!(engine.canonicalize("kg.m2.s-3.A-1.K.mol").is_ok());

    match engine.canonicalize("kg.m2.s-3.A-1.K.mol.cd") {
        Err(CanonError::ResourceLimitExceeded { limit_name, .. }) => {
            assert_eq!(limit_name, "max_factors");
        }
        other => panic!("Expected ResourceLimitExceeded error, got {:?}", other),
    }
}

#[test]
fn test_limit_errors_do_not_stop_a_batch() {
    let engine = engine_with(ResourceLimits {
        max_factors: 1,
        ..ResourceLimits::default()
    });
    let outcome = engine.process_batch(["m", "m.s", "s"]);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].input, "m.s");
}
