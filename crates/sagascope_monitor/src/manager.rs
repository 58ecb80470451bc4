//! The effect manager: canonical, append/mutate-only index of every effect
//! the runtime has reported.
//!
//! The manager never expires entries, so a full trace can be dumped for
//! inspection at any point in the run. Bounded retention is the working
//! store's job, not the manager's.

use std::collections::HashMap;

use sagascope_foundation::{EffectId, Error, Result};

use crate::record::EffectRecord;

// =============================================================================
// Effect Manager
// =============================================================================

/// Tree store of effect records, indexed by id with parent/child navigation.
///
/// Child ids are maintained incrementally in first-seen order, which is the
/// order `set` first observed each id, regardless of settlement order.
#[derive(Default)]
pub struct EffectManager {
    records: HashMap<EffectId, EffectRecord>,
    order: Vec<EffectId>,
    children: HashMap<EffectId, Vec<EffectId>>,
    root: Option<EffectId>,
}

impl EffectManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for an id.
    ///
    /// Insertion order and the child index are established by the first
    /// `set` for an id; replacing an existing record keeps both intact.
    pub fn set(&mut self, id: EffectId, record: EffectRecord) {
        if !self.records.contains_key(&id) {
            self.order.push(id);
            if let Some(parent) = record.parent_effect_id {
                self.children.entry(parent).or_default().push(id);
            }
        }
        self.records.insert(id, record);
    }

    /// Records the distinguished root effect.
    ///
    /// Callable at most once per run; a second call fails with
    /// `RootAlreadySet` and leaves the store untouched.
    pub fn set_root_effect(&mut self, id: EffectId, record: EffectRecord) -> Result<()> {
        if let Some(existing) = self.root {
            return Err(Error::root_already_set(existing));
        }
        self.root = Some(id);
        self.set(id, record);
        Ok(())
    }

    /// Returns the record for an id.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when the id has never been seen.
    pub fn get(&self, id: EffectId) -> Result<&EffectRecord> {
        self.records.get(&id).ok_or_else(|| Error::not_found(id))
    }

    /// Returns the record for an id, mutably.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when the id has never been seen.
    pub fn get_mut(&mut self, id: EffectId) -> Result<&mut EffectRecord> {
        self.records
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Returns the root effect id, once registered.
    #[must_use]
    pub fn root_id(&self) -> Option<EffectId> {
        self.root
    }

    /// Returns all child ids of a parent, in first-seen order.
    #[must_use]
    pub fn child_ids(&self, parent: EffectId) -> &[EffectId] {
        self.children.get(&parent).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of tracked records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no effect has been reported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

// =============================================================================
// Tests
// =============================================================================
