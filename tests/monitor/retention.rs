//! Working-store retention policies, driven through the facade.

use sagascope_foundation::{EffectId, EffectKind, Value};
use sagascope_monitor::{
    EffectDescriptor, EffectOutcome, EvictOnSettle, EvictStructural, KeepAll, MemorySink,
    MonitorConfig, SagaMonitor,
};

use crate::call_desc;

fn monitor_with(retention: impl sagascope_monitor::RetentionPolicy + 'static) -> SagaMonitor {
    let config = MonitorConfig::new()
        .with_effect_trigger(true)
        .with_retention(retention)
        .with_sink(MemorySink::new());
    SagaMonitor::with_config(config)
}

// =============================================================================
// Keep All
// =============================================================================

#[test]
fn keep_all_retains_settled_entries() {
    let mut monitor = monitor_with(KeepAll);
    monitor.effect_triggered(call_desc(1, None, "a", vec![]));
    monitor.effect_resolved(EffectId::new(1), EffectOutcome::Value(Value::Int(1)));

    assert_eq!(monitor.store_len(), 1);
}

// =============================================================================
// Evict On Settle
// =============================================================================

#[test]
fn settled_entry_with_no_pending_relations_is_evicted() {
    let mut monitor = monitor_with(EvictOnSettle);
    monitor.effect_triggered(call_desc(1, None, "parent", vec![]));
    monitor.effect_triggered(call_desc(2, Some(1), "child", vec![]));

    // Parent settles first; the child is still pending, so the parent entry
    // must survive (it is still referenced as a parent).
    monitor.effect_resolved(EffectId::new(1), EffectOutcome::Value(Value::Int(0)));
    assert!(monitor.store_snapshot().entries.iter().any(|e| e.effect_id == EffectId::new(1)));

    // Now the child settles with a settled parent and no children of its
    // own: its entry goes away.
    monitor.effect_resolved(EffectId::new(2), EffectOutcome::Value(Value::Int(0)));
    assert!(
        monitor
            .store_snapshot()
            .entries
            .iter()
            .all(|e| e.effect_id != EffectId::new(2))
    );
}

#[test]
fn entry_is_retained_while_its_parent_is_pending() {
    let mut monitor = monitor_with(EvictOnSettle);
    monitor.effect_triggered(call_desc(10, None, "parent", vec![]));
    monitor.effect_triggered(call_desc(11, Some(10), "child", vec![]));

    monitor.effect_resolved(EffectId::new(11), EffectOutcome::Value(Value::Int(0)));

    // The parent never settled, so the child entry stays for message
    // lookups.
    assert!(
        monitor
            .store_snapshot()
            .entries
            .iter()
            .any(|e| e.effect_id == EffectId::new(11))
    );
}

#[test]
fn eviction_applies_on_reject_and_cancel_too() {
    let mut monitor = monitor_with(EvictOnSettle);
    monitor.effect_triggered(call_desc(1, None, "a", vec![]));
    monitor.effect_triggered(call_desc(2, None, "b", vec![]));

    monitor.effect_rejected(EffectId::new(1), Value::from("boom"));
    monitor.effect_cancelled(EffectId::new(2));

    assert_eq!(monitor.store_len(), 0);
}

// =============================================================================
// Evict Structural
// =============================================================================

#[test]
fn structural_kinds_never_enter_the_store() {
    let mut monitor = monitor_with(EvictStructural);
    monitor.effect_triggered(EffectDescriptor::new(
        EffectId::new(1),
        EffectKind::Take,
        Value::Nil,
    ));
    monitor.effect_triggered(EffectDescriptor::new(
        EffectId::new(2),
        EffectKind::Select,
        Value::Nil,
    ));
    monitor.effect_triggered(call_desc(3, None, "worker", vec![]));

    let snapshot = monitor.store_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.entries[0].effect_id, EffectId::new(3));
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn store_is_not_fed_while_trigger_tracking_is_off() {
    let config = MonitorConfig::new().with_sink(MemorySink::new());
    let mut monitor = SagaMonitor::with_config(config);

    monitor.effect_triggered(call_desc(1, None, "a", vec![]));
    assert_eq!(monitor.store_len(), 0);
}
