//! Integration tests for error construction and messages.

use sagascope_foundation::{EffectId, Error, ErrorKind};

#[test]
fn not_found_carries_the_effect_id() {
    let err = Error::not_found(EffectId::new(12));
    match err.kind {
        ErrorKind::NotFound(id) => assert_eq!(id, EffectId::new(12)),
        other => panic!("unexpected kind: {other}"),
    }
}

#[test]
fn race_label_mismatch_names_both_sides() {
    let err = Error::race_label_mismatch(EffectId::new(4), "timeout");
    let msg = err.to_string();
    assert!(msg.contains("Effect(4)"));
    assert!(msg.contains("timeout"));
}

#[test]
fn malformed_payload_keeps_detail() {
    let err = Error::malformed_payload("args is not a sequence");
    assert!(err.to_string().contains("args is not a sequence"));
}

#[test]
fn errors_display_through_the_kind() {
    let err = Error::root_already_set(EffectId::new(1));
    assert_eq!(err.to_string(), err.kind.to_string());
}
