//! The saga monitor facade.
//!
//! The host effect-runtime invokes one callback per lifecycle event; the
//! facade gates diagnostics per configuration, feeds the working store and
//! the manager, and exposes the inspection surface. Every monitor owns its
//! own state, so independent monitors coexist without shared globals.
//!
//! Nothing here returns an error to the host: internal failures become
//! diagnostic lines and the effect stream keeps flowing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use sagascope_foundation::{EffectId, Error, Value};

use crate::config::MonitorConfig;
use crate::lifecycle;
use crate::manager::EffectManager;
use crate::record::{EffectDescriptor, EffectRecord, RootDescriptor};
use crate::snapshot::{EffectSnapshot, SagaSnapshot, StoreEntrySnapshot, StoreSnapshot};
use crate::store::{SettleContext, WorkingEntry, WorkingStore};
use crate::task::EffectOutcome;

// =============================================================================
// Shared state
// =============================================================================

/// State shared between the facade and deferred task continuations.
pub(crate) struct MonitorInner {
    /// The permanent effect tree.
    pub(crate) manager: EffectManager,
    /// The policy-bounded working store.
    pub(crate) store: WorkingStore,
    /// Number of synthesized messages so far.
    pub(crate) messages: u64,
    epoch: Instant,
}

impl MonitorInner {
    pub(crate) fn new() -> Self {
        Self {
            manager: EffectManager::new(),
            store: WorkingStore::new(),
            messages: 0,
            epoch: Instant::now(),
        }
    }

    /// Monotonic milliseconds since the monitor was created.
    pub(crate) fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

// =============================================================================
// Saga Monitor
// =============================================================================

/// The engine facade the host effect-runtime calls into.
pub struct SagaMonitor {
    inner: Rc<RefCell<MonitorInner>>,
    config: MonitorConfig,
}

impl SagaMonitor {
    /// Creates a monitor with the default (all gates off) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MonitorConfig::default())
    }

    /// Creates a monitor with the given configuration.
    #[must_use]
    pub fn with_config(config: MonitorConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MonitorInner::new())),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle callbacks
    // -------------------------------------------------------------------------

    /// Reports that the root saga started.
    pub fn root_saga_started(&mut self, desc: RootDescriptor) {
        if self.config.root_saga_start {
            let line = format!(
                "rootSagaStarted: {} {}",
                desc.saga_name(),
                Value::List(desc.args.clone()),
            );
            self.config.sink.emit(&line);
        }

        let effect_id = desc.effect_id;
        let result = {
            let mut guard = self.inner.borrow_mut();
            let now = guard.now_ms();
            let record = EffectRecord::root(desc, now);
            guard.manager.set_root_effect(effect_id, record)
        };
        if let Err(err) = result {
            self.report(&err);
        }
    }

    /// Reports that an effect was triggered.
    pub fn effect_triggered(&mut self, desc: EffectDescriptor) {
        if self.config.effect_trigger {
            // Compose against the parent entry before this effect joins the
            // store, so the lookup cannot find the effect itself.
            let message = {
                let guard = self.inner.borrow();
                desc.parent_effect_id
                    .and_then(|parent| guard.store.lookup(parent))
                    .and_then(|parent| self.config.composer.compose(&desc, parent))
            };

            if let Some(message) = message {
                self.inner.borrow_mut().messages += 1;
                if self.config.show_data_with_message {
                    let line = format!(
                        "{message}  [{} {} {}]",
                        desc.effect_id, desc.kind, desc.payload
                    );
                    self.config.sink.emit(&line);
                } else {
                    self.config.sink.emit(&message);
                }
            }

            let entry = WorkingEntry::from_descriptor(&desc);
            if self.config.retention.admit(&entry) {
                self.inner.borrow_mut().store.push(entry);
            }
        }

        lifecycle::apply_triggered(&mut self.inner.borrow_mut(), desc);
    }

    /// Reports that an effect resolved.
    ///
    /// A task outcome defers the terminal transition until the task itself
    /// settles; the record stays pending in the meantime.
    pub fn effect_resolved(&mut self, id: EffectId, outcome: EffectOutcome) {
        if self.config.effect_resolve {
            let line = match &outcome {
                EffectOutcome::Value(value) => format!("effectResolved: {id} {value}"),
                EffectOutcome::Task(_) => format!("effectResolved: {id} <task>"),
            };
            self.config.sink.emit(&line);
        }

        if let Err(err) = lifecycle::resolve(&self.inner, id, outcome) {
            self.report(&err);
        }
        self.apply_retention(id);
    }

    /// Reports that an effect rejected.
    pub fn effect_rejected(&mut self, id: EffectId, error: Value) {
        if self.config.effect_reject {
            let line = format!("effectRejected: {id} {error}");
            self.config.sink.emit(&line);
        }

        if let Err(err) = lifecycle::reject(&self.inner, id, &error) {
            self.report(&err);
        }
        self.apply_retention(id);
    }

    /// Reports that an effect was cancelled.
    pub fn effect_cancelled(&mut self, id: EffectId) {
        if self.config.effect_cancel {
            let line = format!("effectCancelled: {id}");
            self.config.sink.emit(&line);
        }

        if let Err(err) = lifecycle::cancel(&self.inner, id) {
            self.report(&err);
        }
        self.apply_retention(id);
    }

    /// Reports that an action was dispatched.
    pub fn action_dispatched(&mut self, action: &Value) {
        if self.config.action_dispatch {
            let kind = action.get("type").unwrap_or(action);
            let line = format!("actionDispatched: {kind}");
            self.config.sink.emit(&line);
        }
    }

    // -------------------------------------------------------------------------
    // Inspection surface
    // -------------------------------------------------------------------------

    /// Dumps the manager's full tree.
    #[must_use]
    pub fn saga_snapshot(&self) -> SagaSnapshot {
        let guard = self.inner.borrow();
        SagaSnapshot {
            effects: guard.manager.iter().map(EffectSnapshot::from_record).collect(),
        }
    }

    /// Dumps the working store's current contents.
    #[must_use]
    pub fn store_snapshot(&self) -> StoreSnapshot {
        let guard = self.inner.borrow();
        StoreSnapshot {
            entries: guard
                .store
                .iter()
                .map(StoreEntrySnapshot::from_entry)
                .collect(),
        }
    }

    /// Number of synthesized messages produced so far.
    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.inner.borrow().messages
    }

    /// Returns a copy of one tracked record.
    #[must_use]
    pub fn record(&self, id: EffectId) -> Option<EffectRecord> {
        self.inner.borrow().manager.get(id).ok().cloned()
    }

    /// Returns the child ids of an effect, in first-seen order.
    #[must_use]
    pub fn child_ids(&self, id: EffectId) -> Vec<EffectId> {
        self.inner.borrow().manager.child_ids(id).to_vec()
    }

    /// Returns the number of entries currently in the working store.
    #[must_use]
    pub fn store_len(&self) -> usize {
        self.inner.borrow().store.len()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Runs the retention policy after a settle event.
    fn apply_retention(&mut self, id: EffectId) {
        let updated = {
            let guard = self.inner.borrow();
            let current = guard.store.lookup(id);
            let parent = current.and_then(|c| guard.store.parent_of(c));
            let parent_pending = current
                .and_then(|c| c.parent_effect_id)
                .and_then(|p| guard.manager.get(p).ok())
                .is_some_and(|r| !r.is_terminal());
            let pending_children = guard
                .manager
                .child_ids(id)
                .iter()
                .filter_map(|child| guard.manager.get(*child).ok())
                .any(|r| !r.is_terminal());

            let ctx = SettleContext {
                current,
                parent,
                parent_pending,
                pending_children,
            };
            self.config.retention.on_settle(&ctx, &guard.store)
        };
        self.inner.borrow_mut().store = updated;
    }

    /// Surfaces an internal anomaly as a diagnostic line.
    fn report(&mut self, err: &Error) {
        self.config.sink.emit(&format!("monitor: {err}"));
    }
}

impl Default for SagaMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
