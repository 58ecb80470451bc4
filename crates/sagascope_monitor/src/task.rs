//! Deferred resolution of forked sub-computations.
//!
//! A `FORK` effect resolves to a live task handle, not a value; its true
//! outcome is only known once that handle itself settles. The lifecycle
//! controller must therefore not mark such an effect resolved with the
//! handle as the result — it attaches a continuation and waits.

use sagascope_foundation::Value;

// =============================================================================
// Effect Outcome
// =============================================================================

/// What the host runtime hands over when an effect resolves.
pub enum EffectOutcome {
    /// A plain settled value.
    Value(Value),
    /// A handle to a still-running sub-computation.
    Task(Box<dyn TaskHandle>),
}

impl std::fmt::Debug for EffectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "Value({v:?})"),
            Self::Task(_) => write!(f, "Task(..)"),
        }
    }
}

impl From<Value> for EffectOutcome {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// =============================================================================
// Task Handle
// =============================================================================

/// How a task reports its eventual settlement.
pub enum TaskSettlement {
    /// The task ran to completion. The carried outcome may itself be a
    /// further task handle; the controller recurses until a value appears.
    Completed(EffectOutcome),
    /// The task failed with an error value.
    Failed(Value),
    /// The task was cancelled before completing.
    Cancelled,
}

/// Continuation invoked exactly once when a task settles.
pub type Continuation = Box<dyn FnOnce(TaskSettlement)>;

/// A capability over an externally-owned asynchronous sub-computation.
///
/// The engine performs no scheduling of its own: `subscribe` hands the
/// continuation to whatever cooperative scheduler owns the task, which must
/// deliver the settlement on the same single-threaded dispatch the engine's
/// callbacks run on.
pub trait TaskHandle {
    /// Registers the settlement continuation, consuming the handle.
    fn subscribe(self: Box<Self>, continuation: Continuation);
}

/// A task that has already settled; `subscribe` delivers synchronously.
///
/// Hosts use this to report forks that completed before the monitor
/// observed them; tests use it to drive the deferred branch
/// deterministically.
pub struct ImmediateTask {
    settlement: TaskSettlement,
}

impl ImmediateTask {
    /// A task that completed with the given outcome.
    #[must_use]
    pub fn completed(outcome: impl Into<EffectOutcome>) -> Self {
        Self {
            settlement: TaskSettlement::Completed(outcome.into()),
        }
    }

    /// A task that failed with the given error value.
    #[must_use]
    pub fn failed(error: impl Into<Value>) -> Self {
        Self {
            settlement: TaskSettlement::Failed(error.into()),
        }
    }

    /// A task that was cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            settlement: TaskSettlement::Cancelled,
        }
    }
}

impl TaskHandle for ImmediateTask {
    fn subscribe(self: Box<Self>, continuation: Continuation) {
        continuation(self.settlement);
    }
}

// =============================================================================
// Tests
// =============================================================================
