//! The working store: a policy-bounded view of recently triggered effects.
//!
//! Entries are normalized projections used only for relationship lookups
//! during message synthesis; they carry no status or timing and their
//! lifetime is governed by a pluggable [`RetentionPolicy`], not by the
//! manager's permanent tree.
//!
//! The store wraps a persistent vector so policies are pure
//! `store -> store` functions: cloning is O(1) and the previous state stays
//! valid while a policy computes the next one.

use im::Vector;

use sagascope_foundation::{EffectId, EffectKind, Value, normalize};

use crate::record::EffectDescriptor;

// =============================================================================
// Working Entry
// =============================================================================

/// A normalized snapshot of a triggered effect's payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingEntry {
    /// Id of the owning effect.
    pub effect_id: EffectId,
    /// Declared parent effect, if any.
    pub parent_effect_id: Option<EffectId>,
    /// The effect kind tag.
    pub kind: EffectKind,
    /// The payload after argument normalization.
    pub payload: Value,
}

impl WorkingEntry {
    /// Builds an entry from a trigger descriptor, normalizing its payload.
    #[must_use]
    pub fn from_descriptor(desc: &EffectDescriptor) -> Self {
        Self {
            effect_id: desc.effect_id,
            parent_effect_id: desc.parent_effect_id,
            kind: desc.kind.clone(),
            payload: normalize(&desc.payload),
        }
    }
}

// =============================================================================
// Working Store
// =============================================================================

/// Append-ordered collection of [`WorkingEntry`] values.
#[derive(Clone, Default)]
pub struct WorkingStore {
    entries: Vector<WorkingEntry>,
}

impl WorkingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: WorkingEntry) {
        self.entries.push_back(entry);
    }

    /// Finds the entry owned by the given effect id.
    #[must_use]
    pub fn lookup(&self, id: EffectId) -> Option<&WorkingEntry> {
        self.entries.iter().find(|e| e.effect_id == id)
    }

    /// Finds the entry for another entry's declared parent.
    #[must_use]
    pub fn parent_of(&self, entry: &WorkingEntry) -> Option<&WorkingEntry> {
        entry.parent_effect_id.and_then(|id| self.lookup(id))
    }

    /// Returns a store with every entry except the one owned by `id`.
    #[must_use]
    pub fn without(&self, id: EffectId) -> Self {
        self.retain(|e| e.effect_id != id)
    }

    /// Returns a store with only the entries matching the predicate.
    #[must_use]
    pub fn retain<F>(&self, predicate: F) -> Self
    where
        F: Fn(&WorkingEntry) -> bool,
    {
        Self {
            entries: self
                .entries
                .iter()
                .cloned()
                .filter(|entry| predicate(entry))
                .collect(),
        }
    }

    /// Iterates entries in append order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkingEntry> {
        self.entries.iter()
    }
}

// =============================================================================
// Retention Policy
// =============================================================================

/// What a retention policy sees when an effect settles.
///
/// `current` and `parent` are the store entries for the settling effect and
/// its declared parent, when present. The pending flags come from the
/// manager: whether the parent record is still `Pending` and whether any
/// child of the settling effect is.
pub struct SettleContext<'a> {
    /// Store entry of the effect that just settled.
    pub current: Option<&'a WorkingEntry>,
    /// Store entry of its declared parent.
    pub parent: Option<&'a WorkingEntry>,
    /// True while the parent record is still pending.
    pub parent_pending: bool,
    /// True while any child of the settling effect is still pending.
    pub pending_children: bool,
}

/// Pluggable eviction strategy for the working store.
///
/// `on_settle` runs at every resolve/reject/cancel notification and returns
/// the updated store. A policy must never remove an entry that is still
/// referenced as a parent by a pending child.
pub trait RetentionPolicy {
    /// Whether a freshly triggered entry should be admitted at all.
    fn admit(&self, entry: &WorkingEntry) -> bool {
        let _ = entry;
        true
    }

    /// Computes the store contents after a settle event.
    fn on_settle(&self, ctx: &SettleContext<'_>, store: &WorkingStore) -> WorkingStore;
}

/// Never evicts. Suited to full-session inspection of short runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepAll;

impl RetentionPolicy for KeepAll {
    fn on_settle(&self, _ctx: &SettleContext<'_>, store: &WorkingStore) -> WorkingStore {
        store.clone()
    }
}

/// Evicts an entry once its effect settles, bounding memory for
/// long-running processes with many short-lived effects.
///
/// The entry is kept while its parent is still pending (the relationship
/// may still be needed for messages) or while any of its own children is.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvictOnSettle;

impl RetentionPolicy for EvictOnSettle {
    fn on_settle(&self, ctx: &SettleContext<'_>, store: &WorkingStore) -> WorkingStore {
        match ctx.current {
            Some(current) if !ctx.parent_pending && !ctx.pending_children => {
                store.without(current.effect_id)
            }
            _ => store.clone(),
        }
    }
}

/// Refuses structural-kind entries at admission time.
///
/// Structural effects are never the subject of a message, so their entries
/// would only ever serve as parents; everything admitted is kept for the
/// session, like [`KeepAll`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EvictStructural;

impl RetentionPolicy for EvictStructural {
    fn admit(&self, entry: &WorkingEntry) -> bool {
        !entry.kind.is_structural()
    }

    fn on_settle(&self, _ctx: &SettleContext<'_>, store: &WorkingStore) -> WorkingStore {
        store.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
