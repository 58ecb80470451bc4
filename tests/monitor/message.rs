//! Message synthesis, driven through the facade.

use sagascope_foundation::{EffectId, EffectKind, Value, ValueMap};
use sagascope_monitor::{CausalComposer, EffectDescriptor, MessageComposer, WorkingEntry};

use crate::{call_desc, fork_desc, observed_monitor, put_desc};

// =============================================================================
// End-To-End Synthesis
// =============================================================================

#[test]
fn fork_put_relationship_produces_the_causal_line() {
    let (mut monitor, sink) = observed_monitor();

    monitor.effect_triggered(fork_desc(1, None, "watchLogin", "LOGIN"));
    monitor.effect_triggered(put_desc(2, 1, "LOGIN_SUCCESS"));

    let lines = sink.lines();
    let message = lines
        .iter()
        .find(|l| l.contains("watchLogin"))
        .expect("message emitted");
    assert!(message.contains("LOGIN"));
    assert!(message.contains("LOGIN_SUCCESS"));
    assert_eq!(monitor.message_count(), 1);
}

#[test]
fn self_referential_call_is_suppressed_through_the_facade() {
    let (mut monitor, sink) = observed_monitor();

    monitor.effect_triggered(call_desc(1, None, "loadUser", vec![Value::from("loadUser")]));
    monitor.effect_triggered(call_desc(2, Some(1), "loadUser", vec![]));

    assert_eq!(monitor.message_count(), 0);
    assert!(sink.lines().iter().all(|l| !l.contains("loadUser called")));
}

#[test]
fn effect_without_parent_entry_is_silent() {
    let (mut monitor, _sink) = observed_monitor();

    monitor.effect_triggered(put_desc(2, 99, "ORPHAN"));
    assert_eq!(monitor.message_count(), 0);
}

#[test]
fn structural_effects_are_never_subjects() {
    let (mut monitor, _sink) = observed_monitor();

    monitor.effect_triggered(fork_desc(1, None, "watchLogin", "LOGIN"));
    for (id, kind) in [
        (2, EffectKind::Take),
        (3, EffectKind::Fork),
        (4, EffectKind::Race),
        (5, EffectKind::Select),
    ] {
        monitor.effect_triggered(
            EffectDescriptor::new(EffectId::new(id), kind, Value::Nil)
                .with_parent(EffectId::new(1)),
        );
    }

    assert_eq!(monitor.message_count(), 0);
}

#[test]
fn message_count_accumulates_across_triggers() {
    let (mut monitor, _sink) = observed_monitor();

    monitor.effect_triggered(fork_desc(1, None, "watchLogin", "LOGIN"));
    monitor.effect_triggered(put_desc(2, 1, "STEP_ONE"));
    monitor.effect_triggered(put_desc(3, 1, "STEP_TWO"));

    assert_eq!(monitor.message_count(), 2);
}

// =============================================================================
// Custom Composer Injection
// =============================================================================

struct CountingComposer;

impl MessageComposer for CountingComposer {
    fn compose(&self, current: &EffectDescriptor, _parent: &WorkingEntry) -> Option<String> {
        Some(format!("seen {}", current.effect_id))
    }
}

#[test]
fn injected_composer_replaces_the_default() {
    let sink = sagascope_monitor::MemorySink::new();
    let config = sagascope_monitor::MonitorConfig::new()
        .with_effect_trigger(true)
        .with_composer(CountingComposer)
        .with_retention(sagascope_monitor::KeepAll)
        .with_sink(sink.clone());
    let mut monitor = sagascope_monitor::SagaMonitor::with_config(config);

    monitor.effect_triggered(fork_desc(1, None, "watchLogin", "LOGIN"));
    monitor.effect_triggered(put_desc(2, 1, "X"));

    assert!(sink.lines().iter().any(|l| l == "seen Effect(2)"));
}

// =============================================================================
// Composer Unit Properties (facade-independent)
// =============================================================================

#[test]
fn composer_matches_the_documented_shape() {
    let parent = WorkingEntry::from_descriptor(&fork_desc(1, None, "watchLogin", "LOGIN"));
    let current = put_desc(2, 1, "LOGIN_SUCCESS");

    let msg = CausalComposer.compose(&current, &parent).unwrap();
    assert_eq!(msg, "watchLogin forked by LOGIN puts LOGIN_SUCCESS");
}

#[test]
fn composer_survives_malformed_parents() {
    // An args value that is not a sequence must yield silence, not a panic.
    let desc = EffectDescriptor::new(
        EffectId::new(1),
        EffectKind::Fork,
        Value::Map(
            ValueMap::new()
                .with("fn", Value::from("watchLogin"))
                .with("args", Value::Int(3)),
        ),
    );
    let parent = WorkingEntry::from_descriptor(&desc);

    assert!(CausalComposer.compose(&put_desc(2, 1, "X"), &parent).is_none());
}
