//! The lifecycle controller: drives effect records through their state
//! machine.
//!
//! The `apply_*` functions are the pure core — manager mutation with an
//! explicit timestamp. The `resolve`/`reject`/`cancel` entry points wrap
//! them over the shared engine state and add the deferred-task branch: a
//! fork resolves to a live handle, and the record must stay pending until
//! that handle itself settles.

use std::cell::RefCell;
use std::rc::Rc;

use sagascope_foundation::{EffectId, EffectKind, EffectStatus, Result, Value};

use crate::monitor::MonitorInner;
use crate::race;
use crate::record::EffectRecord;
use crate::task::{EffectOutcome, TaskSettlement};

// =============================================================================
// Pure transitions
// =============================================================================

/// Inserts the pending record for a freshly triggered effect.
pub(crate) fn apply_triggered(inner: &mut MonitorInner, desc: crate::record::EffectDescriptor) {
    let now = inner.now_ms();
    inner
        .manager
        .set(desc.effect_id, EffectRecord::pending(desc, now));
}

/// Marks a record resolved with a settled value and resolves the race
/// winner when the record is a race.
pub(crate) fn apply_resolved(
    inner: &mut MonitorInner,
    id: EffectId,
    value: &Value,
    now_ms: f64,
) -> Result<()> {
    let record = inner.manager.get_mut(id)?;
    record.stamp_end(now_ms);
    record.status = EffectStatus::Resolved;
    record.result = Some(value.clone());
    let is_race = record.kind == EffectKind::Race;

    if is_race {
        race::resolve_winner(&mut inner.manager, id, value)?;
    }
    Ok(())
}

/// Marks a record rejected with an error value.
///
/// A race can be decided by its first-settled branch throwing, so rejection
/// still runs winner resolution against the error shape.
pub(crate) fn apply_rejected(
    inner: &mut MonitorInner,
    id: EffectId,
    error: &Value,
    now_ms: f64,
) -> Result<()> {
    let record = inner.manager.get_mut(id)?;
    record.stamp_end(now_ms);
    record.status = EffectStatus::Rejected;
    record.error = Some(error.clone());
    let is_race = record.kind == EffectKind::Race;

    if is_race {
        race::resolve_winner(&mut inner.manager, id, error)?;
    }
    Ok(())
}

/// Marks a record cancelled. A cancelled race has no winner.
pub(crate) fn apply_cancelled(inner: &mut MonitorInner, id: EffectId, now_ms: f64) -> Result<()> {
    let record = inner.manager.get_mut(id)?;
    record.stamp_end(now_ms);
    record.status = EffectStatus::Cancelled;
    Ok(())
}

// =============================================================================
// Entry points over shared state
// =============================================================================

/// Resolves an effect with an outcome.
///
/// A task outcome defers the transition: a continuation is subscribed on
/// the handle and the record stays pending until the task settles. The
/// continuation holds only a weak reference, so a monitor dropped before
/// settlement turns it into a no-op.
pub(crate) fn resolve(
    inner: &Rc<RefCell<MonitorInner>>,
    id: EffectId,
    outcome: EffectOutcome,
) -> Result<()> {
    match outcome {
        EffectOutcome::Task(task) => {
            let weak = Rc::downgrade(inner);
            task.subscribe(Box::new(move |settlement| {
                let Some(inner) = weak.upgrade() else { return };
                // Late settlement of an already-mutated record is the host's
                // ordering bug; the result is simply dropped here.
                let _ = deliver(&inner, id, settlement);
            }));
            Ok(())
        }
        EffectOutcome::Value(value) => {
            let mut guard = inner.borrow_mut();
            let now = guard.now_ms();
            apply_resolved(&mut guard, id, &value, now)
        }
    }
}

/// Rejects an effect with an error value.
pub(crate) fn reject(inner: &Rc<RefCell<MonitorInner>>, id: EffectId, error: &Value) -> Result<()> {
    let mut guard = inner.borrow_mut();
    let now = guard.now_ms();
    apply_rejected(&mut guard, id, error, now)
}

/// Cancels an effect.
pub(crate) fn cancel(inner: &Rc<RefCell<MonitorInner>>, id: EffectId) -> Result<()> {
    let mut guard = inner.borrow_mut();
    let now = guard.now_ms();
    apply_cancelled(&mut guard, id, now)
}

/// Routes a task settlement back into the state machine.
fn deliver(
    inner: &Rc<RefCell<MonitorInner>>,
    id: EffectId,
    settlement: TaskSettlement,
) -> Result<()> {
    match settlement {
        TaskSettlement::Completed(outcome) => resolve(inner, id, outcome),
        TaskSettlement::Failed(error) => reject(inner, id, &error),
        TaskSettlement::Cancelled => cancel(inner, id),
    }
}

// =============================================================================
// Tests
// =============================================================================
