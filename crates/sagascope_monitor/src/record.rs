//! Effect descriptors and tracked records.
//!
//! A descriptor is what the host runtime hands over at trigger time; a
//! record is the engine's long-lived view of that effect, mutated by the
//! lifecycle controller as settle notifications arrive.

use std::sync::Arc;

use sagascope_foundation::{EffectId, EffectKind, EffectStatus, FnRef, Value, ValueMap};

// =============================================================================
// Descriptors
// =============================================================================

/// What the host runtime reports when an effect is triggered.
#[derive(Clone, Debug)]
pub struct EffectDescriptor {
    /// Unique id assigned by the host runtime.
    pub effect_id: EffectId,
    /// The enclosing effect, absent for effects triggered by the root saga
    /// bootstrap itself.
    pub parent_effect_id: Option<EffectId>,
    /// The key under which this effect appears inside an enclosing race's
    /// payload, if any.
    pub label: Option<Arc<str>>,
    /// The effect kind tag.
    pub kind: EffectKind,
    /// The raw semi-structured payload.
    pub payload: Value,
}

impl EffectDescriptor {
    /// Creates a descriptor with no parent and no label.
    #[must_use]
    pub fn new(effect_id: EffectId, kind: EffectKind, payload: Value) -> Self {
        Self {
            effect_id,
            parent_effect_id: None,
            label: None,
            kind,
            payload,
        }
    }

    /// Builder method to set the parent effect id.
    #[must_use]
    pub fn with_parent(mut self, parent: EffectId) -> Self {
        self.parent_effect_id = Some(parent);
        self
    }

    /// Builder method to set the race branch label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What the host runtime reports when the root saga starts.
#[derive(Clone, Debug)]
pub struct RootDescriptor {
    /// Unique id assigned by the host runtime.
    pub effect_id: EffectId,
    /// The root saga function.
    pub saga: FnRef,
    /// Arguments the root saga was started with.
    pub args: Vec<Value>,
}

impl RootDescriptor {
    /// Creates a root descriptor.
    #[must_use]
    pub fn new(effect_id: EffectId, saga: FnRef, args: Vec<Value>) -> Self {
        Self {
            effect_id,
            saga,
            args,
        }
    }

    /// The saga's declared name, or `"anonymous"` when it has none.
    #[must_use]
    pub fn saga_name(&self) -> &str {
        self.saga.name().unwrap_or("anonymous")
    }
}

// =============================================================================
// Effect Record
// =============================================================================

/// A tracked effect: descriptor data plus lifecycle state and timing.
///
/// Records are owned exclusively by the manager, created at trigger time,
/// mutated only by the lifecycle controller, and never deleted while the
/// process runs.
#[derive(Clone, Debug)]
pub struct EffectRecord {
    /// Unique id assigned by the host runtime.
    pub effect_id: EffectId,
    /// The enclosing effect, absent for the root.
    pub parent_effect_id: Option<EffectId>,
    /// Race branch label, if any.
    pub label: Option<Arc<str>>,
    /// The effect kind tag.
    pub kind: EffectKind,
    /// The raw payload as reported at trigger time.
    pub payload: Value,
    /// Current lifecycle status.
    pub status: EffectStatus,
    /// Monotonic trigger timestamp in milliseconds.
    pub start: f64,
    /// Monotonic settle timestamp, stamped once at the first terminal
    /// transition.
    pub end: Option<f64>,
    /// `end - start`, stamped together with `end`.
    pub duration: Option<f64>,
    /// The settled result, present only after `Resolved`.
    pub result: Option<Value>,
    /// The settled error, present only after `Rejected`.
    pub error: Option<Value>,
    /// True on the winning child of a settled race.
    pub winner: bool,
}

impl EffectRecord {
    /// Creates a pending record from a trigger descriptor.
    #[must_use]
    pub fn pending(desc: EffectDescriptor, start_ms: f64) -> Self {
        Self {
            effect_id: desc.effect_id,
            parent_effect_id: desc.parent_effect_id,
            label: desc.label,
            kind: desc.kind,
            payload: desc.payload,
            status: EffectStatus::Pending,
            start: start_ms,
            end: None,
            duration: None,
            result: None,
            error: None,
            winner: false,
        }
    }

    /// Creates the pending root record.
    ///
    /// The root is not an effect the runtime described with a kind tag; it
    /// participates in the tree as a [`EffectKind::Root`] record whose
    /// payload carries the saga reference and its arguments.
    #[must_use]
    pub fn root(desc: RootDescriptor, start_ms: f64) -> Self {
        let payload = Value::Map(
            ValueMap::new()
                .with("saga", Value::Func(desc.saga))
                .with("args", Value::List(desc.args)),
        );
        Self::pending(
            EffectDescriptor::new(desc.effect_id, EffectKind::Root, payload),
            start_ms,
        )
    }

    /// Returns true once the record has reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Stamps `end` and `duration` at the first terminal transition.
    ///
    /// Later calls are ignored; the first settle notification owns the
    /// timing.
    pub(crate) fn stamp_end(&mut self, now_ms: f64) {
        if self.end.is_none() {
            self.end = Some(now_ms);
            self.duration = Some(now_ms - self.start);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
