//! Resolution behaviour of the built-in OrionPart catalog.
//!
//! These pin the precedence rules: the first declared part satisfying any
//! strategy wins, and absence of a match is a plain `None`.

use truckdiag_catalog::{normalize, resolve_part, MatchStrategy, PartResolver};

fn part_number(term: &str) -> Option<&'static str> {
    resolve_part(Some(term)).map(|p| p.part_number)
}

#[test]
fn normalize_equates_spacing_and_case_variants() {
    assert_eq!(normalize("SID 232"), "sid232");
    assert_eq!(normalize("sid-232"), "sid232");
}

#[test]
fn missing_or_empty_term_resolves_to_none() {
    assert!(resolve_part(None).is_none());
    assert!(resolve_part(Some("")).is_none());
}

#[test]
fn symbol_only_term_resolves_to_first_declared_part() {
    assert_eq!(part_number("--"), Some("301250"));
    assert_eq!(part_number(" "), Some("301250"));
}

#[test]
fn sid_232_resolves_to_5v_supply() {
    let part = resolve_part(Some("SID232")).unwrap();
    assert_eq!(part.category, "5v_supply");
    assert_eq!(part.part_number, "SID232");
    assert_eq!(part.name, "5V SENSOR SUPPLY (ECU)");
}

#[test]
fn fallback_part_name_resolves_to_5v_supply() {
    assert_eq!(part_number("5V Sensor Supply"), Some("SID232"));
    assert_eq!(part_number("MID 128 SID 232 FMI 3"), Some("SID232"));
}

#[test]
fn oil_pressure_sensor_resolves_by_name() {
    let m = PartResolver::orion()
        .resolve_with_strategy(Some("oil pressure sensor"))
        .unwrap();
    assert_eq!(m.part.category, "oil_sensor");
    assert_eq!(m.part.part_number, "302018");
    assert_eq!(m.strategy, MatchStrategy::Name);
}

#[test]
fn tie_rod_resolves_to_first_declared_entry() {
    assert_eq!(part_number("tie rod"), Some("301236"));
    assert_eq!(part_number("rod"), Some("301236"));
}

#[test]
fn compressor_resolves_to_first_declared_entry() {
    assert_eq!(part_number("Air Compressor"), Some("301250"));
}

#[test]
fn unknown_term_resolves_to_none() {
    assert!(resolve_part(Some("xyz-nonexistent-part")).is_none());
    assert!(resolve_part(Some("ECU Unit")).is_none());
}

#[test]
fn oracle_part_names_resolve_to_expected_parts() {
    let cases = [
        ("Wheel Speed Sensor", "301441"),
        ("Foot Brake Valve", "303070"),
        ("EBS Control Modulator", "303216"),
        ("Circuit Protection Valve", "301476"),
        ("NOx Sensor", "301850"),
        ("Oil Level Sensor", "302016"),
        ("Cabin Tilting Pump", "301191"),
        ("Water Pump", "301080"),
        ("Servo Pump", "301040"),
        ("Fuel Filter", "303295"),
        ("Feed Pump", "301031"),
    ];
    for (term, expected) in cases {
        assert_eq!(part_number(term), Some(expected), "term {term:?}");
    }
}

#[test]
fn earlier_keyword_rule_shadows_later_exact_name() {
    // FEED PUMP is declared before FUEL HAND PUMP and the fuel+pump rule
    // selects it first.
    let m = PartResolver::orion()
        .resolve_with_strategy(Some("Fuel Hand Pump"))
        .unwrap();
    assert_eq!(m.part.part_number, "301031");
    assert_eq!(m.strategy, MatchStrategy::Keyword);
}

#[test]
fn resolution_is_deterministic() {
    for term in ["5V Sensor Supply", "tie rod", "Water Pump", "nothing here"] {
        let first = resolve_part(Some(term));
        for _ in 0..5 {
            assert_eq!(resolve_part(Some(term)), first);
        }
    }
}
