//! # Mapping Strategy Tests
//!
//! Catalog membership, companion requirements, and the 3-core to general translation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xbarsim_core::params::{MappingCatalog, MappingStrategy, TriCoreMapping};
use xbarsim_core::RunnerError;

fn invalid_message(result: xbarsim_core::Result<impl std::fmt::Debug>) -> String {
    match result {
        Err(RunnerError::InvalidArgument(msg)) => msg,
        other => panic!("expected an invalid argument error, got {other:?}"),
    }
}

#[rstest]
#[case(&["ZigZag"], MappingStrategy::ZigZag)]
#[case(&["MinComm"], MappingStrategy::MinComm)]
#[case(&["3Core"], MappingStrategy::ThreeCore)]
#[case(&["Static", "map.xml"], MappingStrategy::Static { file: "map.xml".into() })]
#[case(&["StaticTriCore", "tri.xml"], MappingStrategy::StaticTriCore { file: "tri.xml".into() })]
#[case(&["StaticModes", "modes.xml"], MappingStrategy::StaticModes { file: "modes.xml".into() })]
#[case(&["Randomfixed", "42"], MappingStrategy::RandomFixed { seed: "42".into() })]
fn test_inner_catalog_accepts(#[case] tokens: &[&str], #[case] expected: MappingStrategy) {
    let strategy = MappingStrategy::from_tokens(MappingCatalog::Inner, tokens).unwrap();
    assert_eq!(strategy, expected);
    assert_eq!(strategy.tokens(), tokens.to_vec());
}

#[rstest]
#[case("Static")]
#[case("StaticTriCore")]
#[case("StaticModes")]
fn test_static_requires_file(#[case] name: &str) {
    let msg = invalid_message(MappingStrategy::from_tokens(MappingCatalog::Inner, &[name]));
    assert!(msg.contains("requires a file option"), "{msg}");
}

#[test]
fn test_randomfixed_requires_seed() {
    let msg = invalid_message(MappingStrategy::from_tokens(
        MappingCatalog::Inner,
        &["Randomfixed"],
    ));
    assert!(msg.contains("requires a seed option"), "{msg}");
}

#[test]
fn test_unknown_name_lists_catalog() {
    let msg = invalid_message(MappingStrategy::from_tokens(MappingCatalog::Inner, &["Spiral"]));
    assert!(msg.contains("invalid mapping \"Spiral\""), "{msg}");
    for name in MappingCatalog::Inner.names() {
        assert!(msg.contains(name), "{msg} should list {name}");
    }
}

#[test]
fn test_names_are_case_sensitive() {
    assert!(MappingStrategy::from_tokens(MappingCatalog::Inner, &["zigzag"]).is_err());
}

#[test]
fn test_empty_tokens_rejected() {
    let tokens: [&str; 0] = [];
    assert!(MappingStrategy::from_tokens(MappingCatalog::Inner, &tokens).is_err());
}

#[test]
fn test_companion_for_plain_strategy_rejected() {
    let msg = invalid_message(MappingStrategy::from_tokens(
        MappingCatalog::Inner,
        &["ZigZag", "extra"],
    ));
    assert!(msg.contains("does not take an option"), "{msg}");
}

#[test]
fn test_three_tokens_rejected() {
    assert!(
        MappingStrategy::from_tokens(MappingCatalog::Inner, &["Static", "a.xml", "b.xml"])
            .is_err()
    );
}

#[test]
fn test_tricore_catalog() {
    assert_eq!(
        MappingCatalog::TriCore.names(),
        &["ZigZag", "Static", "StaticModes"]
    );
    for name in ["MinComm", "3Core", "StaticTriCore", "Randomfixed"] {
        assert!(!MappingCatalog::TriCore.contains(name), "{name}");
        assert!(MappingCatalog::Inner.contains(name), "{name}");
    }
}

#[test]
fn test_tricore_rejects_inner_only_names() {
    let msg = invalid_message(TriCoreMapping::from_tokens(&["MinComm"]));
    assert!(msg.contains("invalid mapping"), "{msg}");
    assert!(msg.contains("StaticModes"), "{msg}");
}

#[rstest]
#[case(&["ZigZag"], &["3Core"])]
#[case(&["Static", "tri.xml"], &["StaticTriCore", "tri.xml"])]
#[case(&["StaticModes", "modes.xml"], &["StaticModes", "modes.xml"])]
fn test_tricore_translation(#[case] outer: &[&str], #[case] inner: &[&str]) {
    let mapping = TriCoreMapping::from_tokens(outer).unwrap();
    assert_eq!(mapping.to_inner().tokens(), inner.to_vec());
}

#[test]
fn test_tricore_default_is_zigzag() {
    assert_eq!(TriCoreMapping::default(), TriCoreMapping::ZigZag);
    assert_eq!(TriCoreMapping::default().to_inner(), MappingStrategy::ThreeCore);
}

#[test]
fn test_modes_requirement() {
    assert!(TriCoreMapping::StaticModes { file: "m".into() }.requires_modes_file());
    assert!(!TriCoreMapping::Static { file: "m".into() }.requires_modes_file());
    assert!(MappingStrategy::StaticModes { file: "m".into() }.requires_modes_file());
    assert!(!MappingStrategy::RandomFixed { seed: "1".into() }.requires_modes_file());
}

#[test]
fn test_accessors_and_display() {
    let strategy = MappingStrategy::Static {
        file: "map.xml".into(),
    };
    assert_eq!(strategy.name(), "Static");
    assert_eq!(strategy.mapping_file(), Some("map.xml"));
    assert_eq!(strategy.seed(), None);
    assert_eq!(strategy.to_string(), "Static map.xml");

    let random = MappingStrategy::RandomFixed { seed: "7".into() };
    assert_eq!(random.seed(), Some("7"));
    assert_eq!(random.mapping_file(), None);
    assert_eq!(MappingStrategy::default().to_string(), "ZigZag");
}
