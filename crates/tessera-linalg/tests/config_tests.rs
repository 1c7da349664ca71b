// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use tessera_linalg::{ConfigError, Mat3, NumericConfig, SingularPolicy};

#[test]
fn default_matches_legacy_constants() {
    let cfg = NumericConfig::default();
    assert_eq!(cfg.equivalence_epsilon, tessera_linalg::scalar::EPSILON);
    assert_eq!(cfg.symmetry_epsilon, 1e-6);
    assert_eq!(cfg.pivot_floor, 1e-6);
    assert_eq!(cfg.singular_policy, SingularPolicy::Legacy);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = NumericConfig::from_json(r#"{ "singular_policy": "strict" }"#).unwrap();
    assert!(cfg.is_strict());
    assert_eq!(cfg, NumericConfig::strict());

    let cfg = NumericConfig::from_json(r#"{ "symmetry_epsilon": 0.001 }"#).unwrap();
    assert_eq!(cfg.symmetry_epsilon, 0.001);
    assert!(!cfg.is_strict());
}

#[test]
fn json_round_trip() {
    let cfg = NumericConfig {
        pivot_floor: 1e-9,
        ..NumericConfig::strict()
    };
    let text = cfg.to_json_pretty().unwrap();
    assert!(text.contains("\"strict\""), "{text}");
    assert_eq!(NumericConfig::from_json(&text).unwrap(), cfg);
}

#[test]
fn rejects_non_positive_tolerances() {
    let err = NumericConfig::from_json(r#"{ "pivot_floor": 0.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("pivot_floor")));

    let cfg = NumericConfig {
        equivalence_epsilon: f64::NAN,
        ..NumericConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_malformed_json() {
    let err = NumericConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
    let err = NumericConfig::from_json(r#"{ "singular_policy": "lenient" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn equivalence_follows_configured_epsilon() {
    let cfg = NumericConfig::default();
    assert!(cfg.equivalent(1.0 + 5e-6, 1.0));
    assert!(!cfg.equivalent(1.0 + 5e-4, 1.0));

    let loose = NumericConfig::from_json(r#"{ "equivalence_epsilon": 0.001 }"#).unwrap();
    assert!(loose.equivalent(1.0 + 5e-4, 1.0));

    let mut m = Mat3::identity();
    m.set(1, 2, 5e-4);
    assert!(!m.equivalent_with(&Mat3::identity(), &cfg));
    assert!(m.equivalent_with(&Mat3::identity(), &loose));
}
