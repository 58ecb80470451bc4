//! Race winner resolution, driven through the facade.

use sagascope_foundation::{EffectId, EffectKind, Value, ValueMap};
use sagascope_monitor::{EffectDescriptor, EffectOutcome, SagaMonitor};

use crate::observed_monitor;

fn race_with_branches(monitor: &mut SagaMonitor, race_id: u64, labels: &[(u64, &str)]) {
    monitor.effect_triggered(EffectDescriptor::new(
        EffectId::new(race_id),
        EffectKind::Race,
        Value::Nil,
    ));
    for (id, label) in labels {
        monitor.effect_triggered(
            EffectDescriptor::new(EffectId::new(*id), EffectKind::Call, Value::Nil)
                .with_parent(EffectId::new(race_id))
                .with_label(*label),
        );
    }
}

#[test]
fn winner_flag_lands_on_exactly_the_settled_branch() {
    let mut monitor = SagaMonitor::new();
    race_with_branches(&mut monitor, 1, &[(2, "a"), (3, "b")]);

    let settled = Value::Map(ValueMap::new().with("b", Value::Int(42)));
    monitor.effect_resolved(EffectId::new(1), EffectOutcome::Value(settled));

    assert!(!monitor.record(EffectId::new(2)).unwrap().winner);
    assert!(monitor.record(EffectId::new(3)).unwrap().winner);
}

#[test]
fn rejected_race_still_determines_a_winner() {
    let mut monitor = SagaMonitor::new();
    race_with_branches(&mut monitor, 1, &[(2, "timeout"), (3, "response")]);

    // The race is decided by its first branch throwing; the error shape
    // still names the losing-side label.
    let error = Value::Map(ValueMap::new().with("response", Value::from("boom")));
    monitor.effect_rejected(EffectId::new(1), error);

    assert!(monitor.record(EffectId::new(3)).unwrap().winner);
    assert!(!monitor.record(EffectId::new(2)).unwrap().winner);
}

#[test]
fn cancelled_race_has_no_winner() {
    let mut monitor = SagaMonitor::new();
    race_with_branches(&mut monitor, 1, &[(2, "a"), (3, "b")]);

    monitor.effect_cancelled(EffectId::new(1));

    assert!(!monitor.record(EffectId::new(2)).unwrap().winner);
    assert!(!monitor.record(EffectId::new(3)).unwrap().winner);
}

#[test]
fn unmatched_label_is_reported_and_modifies_nothing() {
    let (mut monitor, sink) = observed_monitor();
    race_with_branches(&mut monitor, 1, &[(2, "a"), (3, "b")]);

    let settled = Value::Map(ValueMap::new().with("c", Value::Int(1)));
    monitor.effect_resolved(EffectId::new(1), EffectOutcome::Value(settled));

    assert!(!monitor.record(EffectId::new(2)).unwrap().winner);
    assert!(!monitor.record(EffectId::new(3)).unwrap().winner);
    assert!(
        sink.lines()
            .iter()
            .any(|l| l.contains("no child labeled") && l.contains("c"))
    );
}

#[test]
fn non_race_resolution_never_sets_winner() {
    let mut monitor = SagaMonitor::new();
    monitor.effect_triggered(EffectDescriptor::new(
        EffectId::new(1),
        EffectKind::Call,
        Value::Nil,
    ));
    monitor.effect_triggered(
        EffectDescriptor::new(EffectId::new(2), EffectKind::Call, Value::Nil)
            .with_parent(EffectId::new(1))
            .with_label("b"),
    );

    // Same single-key shape a race would settle with, but the parent is a
    // plain CALL.
    let settled = Value::Map(ValueMap::new().with("b", Value::Int(1)));
    monitor.effect_resolved(EffectId::new(1), EffectOutcome::Value(settled));

    assert!(!monitor.record(EffectId::new(2)).unwrap().winner);
}
