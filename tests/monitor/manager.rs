//! Tree-store properties observed through snapshots.

use sagascope_foundation::{EffectId, Value};
use sagascope_monitor::{EffectOutcome, SagaMonitor, TreeFormatter};

use crate::{call_desc, put_desc};

#[test]
fn child_ids_follow_trigger_order_not_settlement_order() {
    let mut monitor = SagaMonitor::new();
    monitor.effect_triggered(call_desc(1, None, "parent", vec![]));
    monitor.effect_triggered(call_desc(5, Some(1), "first", vec![]));
    monitor.effect_triggered(call_desc(3, Some(1), "second", vec![]));
    monitor.effect_triggered(call_desc(4, Some(1), "third", vec![]));

    // Settle out of order.
    monitor.effect_resolved(EffectId::new(4), EffectOutcome::Value(Value::Int(1)));
    monitor.effect_resolved(EffectId::new(5), EffectOutcome::Value(Value::Int(1)));

    assert_eq!(
        monitor.child_ids(EffectId::new(1)),
        vec![EffectId::new(5), EffectId::new(3), EffectId::new(4)]
    );
}

#[test]
fn manager_never_expires_settled_records() {
    let mut monitor = SagaMonitor::new();
    for id in 1..=10 {
        monitor.effect_triggered(call_desc(id, None, "worker", vec![]));
        monitor.effect_resolved(EffectId::new(id), EffectOutcome::Value(Value::Int(0)));
    }

    let snapshot = monitor.saga_snapshot();
    assert_eq!(snapshot.len(), 10);
}

#[test]
fn snapshot_preserves_trigger_order() {
    let mut monitor = SagaMonitor::new();
    for id in [9, 2, 7] {
        monitor.effect_triggered(call_desc(id, None, "worker", vec![]));
    }

    let ids: Vec<u64> = monitor
        .saga_snapshot()
        .effects
        .iter()
        .map(|e| e.effect_id.raw())
        .collect();
    assert_eq!(ids, vec![9, 2, 7]);
}

#[test]
fn tree_formatter_renders_the_full_trace() {
    let mut monitor = SagaMonitor::new();
    monitor.effect_triggered(call_desc(1, None, "rootWorker", vec![]));
    monitor.effect_triggered(put_desc(2, 1, "SAVED"));
    monitor.effect_resolved(EffectId::new(2), EffectOutcome::Value(Value::Nil));

    let output = TreeFormatter::new().format(&monitor.saga_snapshot());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("CALL rootWorker"));
    assert!(lines[0].contains("PENDING"));
    assert!(lines[1].starts_with("  PUT SAVED"));
    assert!(lines[1].contains("RESOLVED"));
}
