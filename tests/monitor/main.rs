//! Integration tests for Layer 1: Monitor
//!
//! Tests for the effect manager, lifecycle controller, race resolution,
//! working-store retention, and message synthesis, driven through the
//! public facade.

mod manager;
mod message;
mod race;
mod retention;

use sagascope_foundation::{EffectId, EffectKind, FnRef, Value, ValueMap};
use sagascope_monitor::{EffectDescriptor, MemorySink, MonitorConfig, SagaMonitor};

/// A monitor with trigger tracking on, keep-all retention, and an
/// observable sink.
pub fn observed_monitor() -> (SagaMonitor, MemorySink) {
    let sink = MemorySink::new();
    let config = MonitorConfig::all_events()
        .with_retention(sagascope_monitor::KeepAll)
        .with_sink(sink.clone());
    (SagaMonitor::with_config(config), sink)
}

/// A CALL descriptor invoking `func` with the given args.
pub fn call_desc(id: u64, parent: Option<u64>, func: &str, args: Vec<Value>) -> EffectDescriptor {
    let mut desc = EffectDescriptor::new(
        EffectId::new(id),
        EffectKind::Call,
        Value::Map(
            ValueMap::new()
                .with("fn", Value::Func(FnRef::named(func)))
                .with("args", Value::List(args)),
        ),
    );
    if let Some(p) = parent {
        desc = desc.with_parent(EffectId::new(p));
    }
    desc
}

/// A PUT descriptor dispatching an action of the given type.
pub fn put_desc(id: u64, parent: u64, action_type: &str) -> EffectDescriptor {
    EffectDescriptor::new(
        EffectId::new(id),
        EffectKind::Put,
        Value::Map(
            ValueMap::new().with("action", Value::Map(ValueMap::new().with("type", action_type))),
        ),
    )
    .with_parent(EffectId::new(parent))
}

/// A FORK descriptor of `func` triggered by an action of the given type.
pub fn fork_desc(id: u64, parent: Option<u64>, func: &str, action_type: &str) -> EffectDescriptor {
    let mut desc = EffectDescriptor::new(
        EffectId::new(id),
        EffectKind::Fork,
        Value::Map(
            ValueMap::new()
                .with("fn", Value::Func(FnRef::named(func)))
                .with(
                    "args",
                    Value::List(vec![Value::Map(ValueMap::new().with("type", action_type))]),
                ),
        ),
    );
    if let Some(p) = parent {
        desc = desc.with_parent(EffectId::new(p));
    }
    desc
}
