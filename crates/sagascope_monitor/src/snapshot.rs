//! Inspection snapshots.
//!
//! Snapshots are plain data copied out of the live engine, safe to hold
//! across further lifecycle events and, with the `serde` feature, to export.

use sagascope_foundation::{EffectId, EffectStatus, Value};

use crate::record::EffectRecord;
use crate::store::WorkingEntry;

// =============================================================================
// Effect Snapshot
// =============================================================================

/// A point-in-time copy of one tracked effect.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EffectSnapshot {
    /// Unique effect id.
    pub effect_id: EffectId,
    /// Declared parent, absent for the root.
    pub parent_effect_id: Option<EffectId>,
    /// Race branch label, if any.
    pub label: Option<String>,
    /// Canonical kind tag.
    pub kind: String,
    /// Lifecycle status at snapshot time.
    pub status: EffectStatus,
    /// Monotonic trigger timestamp in milliseconds.
    pub start: f64,
    /// Settle duration in milliseconds, once terminal.
    pub duration: Option<f64>,
    /// True on the winning child of a settled race.
    pub winner: bool,
    /// The payload as reported at trigger time.
    pub payload: Value,
    /// The settled result, if resolved.
    pub result: Option<Value>,
    /// The settled error, if rejected.
    pub error: Option<Value>,
}

impl EffectSnapshot {
    pub(crate) fn from_record(record: &EffectRecord) -> Self {
        Self {
            effect_id: record.effect_id,
            parent_effect_id: record.parent_effect_id,
            label: record.label.as_deref().map(str::to_owned),
            kind: record.kind.name().to_owned(),
            status: record.status,
            start: record.start,
            duration: record.duration,
            winner: record.winner,
            payload: record.payload.clone(),
            result: record.result.clone(),
            error: record.error.clone(),
        }
    }
}

// =============================================================================
// Saga Snapshot
// =============================================================================

/// A full dump of the manager's tree, in first-seen order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SagaSnapshot {
    /// Every effect the runtime has reported, in trigger order.
    pub effects: Vec<EffectSnapshot>,
}

impl SagaSnapshot {
    /// Returns the number of captured effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true when nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Finds a captured effect by id.
    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&EffectSnapshot> {
        self.effects.iter().find(|e| e.effect_id == id)
    }
}

// =============================================================================
// Store Snapshot
// =============================================================================

/// A point-in-time copy of one working-store entry.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StoreEntrySnapshot {
    /// Id of the owning effect.
    pub effect_id: EffectId,
    /// Declared parent effect, if any.
    pub parent_effect_id: Option<EffectId>,
    /// Canonical kind tag.
    pub kind: String,
    /// The normalized payload.
    pub payload: Value,
}

impl StoreEntrySnapshot {
    pub(crate) fn from_entry(entry: &WorkingEntry) -> Self {
        Self {
            effect_id: entry.effect_id,
            parent_effect_id: entry.parent_effect_id,
            kind: entry.kind.name().to_owned(),
            payload: entry.payload.clone(),
        }
    }
}

/// A dump of the working store's current contents, in append order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StoreSnapshot {
    /// Entries currently retained by the working store.
    pub entries: Vec<StoreEntrySnapshot>,
}

impl StoreSnapshot {
    /// Returns the number of captured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the store held nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
