//! Configuration for the saga monitor.

use crate::message::{CausalComposer, MessageComposer};
use crate::sink::{DiagnosticSink, StderrSink};
use crate::store::{EvictOnSettle, RetentionPolicy};

/// Configuration for a [`crate::SagaMonitor`].
///
/// The boolean gates decide, per lifecycle event, whether a diagnostic line
/// is emitted; tracking itself (the manager tree) always runs. The composer
/// and retention strategies are injectable so embedders can swap message
/// synthesis and store eviction without touching the engine.
pub struct MonitorConfig {
    /// Emit a line when the root saga starts.
    pub root_saga_start: bool,
    /// Emit synthesized causal messages when effects are triggered, and
    /// feed the working store.
    pub effect_trigger: bool,
    /// Emit a line when an effect resolves.
    pub effect_resolve: bool,
    /// Emit a line when an effect rejects.
    pub effect_reject: bool,
    /// Emit a line when an effect is cancelled.
    pub effect_cancel: bool,
    /// Emit a line when an action is dispatched.
    pub action_dispatch: bool,
    /// Attach the raw descriptor to each synthesized message line.
    pub show_data_with_message: bool,
    /// Message synthesis strategy.
    pub composer: Box<dyn MessageComposer>,
    /// Working-store retention strategy.
    pub retention: Box<dyn RetentionPolicy>,
    /// Where diagnostic lines go.
    pub sink: Box<dyn DiagnosticSink>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            root_saga_start: false,
            effect_trigger: false,
            effect_resolve: false,
            effect_reject: false,
            effect_cancel: false,
            action_dispatch: false,
            show_data_with_message: false,
            composer: Box::new(CausalComposer),
            retention: Box::new(EvictOnSettle),
            sink: Box::new(StderrSink),
        }
    }
}

impl MonitorConfig {
    /// Creates a configuration with every gate disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with every event gate enabled.
    #[must_use]
    pub fn all_events() -> Self {
        Self {
            root_saga_start: true,
            effect_trigger: true,
            effect_resolve: true,
            effect_reject: true,
            effect_cancel: true,
            action_dispatch: true,
            ..Self::default()
        }
    }

    /// Builder method to gate root saga start lines.
    #[must_use]
    pub fn with_root_saga_start(mut self, enabled: bool) -> Self {
        self.root_saga_start = enabled;
        self
    }

    /// Builder method to gate trigger messages and working-store feeding.
    #[must_use]
    pub fn with_effect_trigger(mut self, enabled: bool) -> Self {
        self.effect_trigger = enabled;
        self
    }

    /// Builder method to gate resolve lines.
    #[must_use]
    pub fn with_effect_resolve(mut self, enabled: bool) -> Self {
        self.effect_resolve = enabled;
        self
    }

    /// Builder method to gate reject lines.
    #[must_use]
    pub fn with_effect_reject(mut self, enabled: bool) -> Self {
        self.effect_reject = enabled;
        self
    }

    /// Builder method to gate cancel lines.
    #[must_use]
    pub fn with_effect_cancel(mut self, enabled: bool) -> Self {
        self.effect_cancel = enabled;
        self
    }

    /// Builder method to gate action dispatch lines.
    #[must_use]
    pub fn with_action_dispatch(mut self, enabled: bool) -> Self {
        self.action_dispatch = enabled;
        self
    }

    /// Builder method to attach raw descriptors to message lines.
    #[must_use]
    pub fn with_show_data(mut self, enabled: bool) -> Self {
        self.show_data_with_message = enabled;
        self
    }

    /// Builder method to inject a message composer.
    #[must_use]
    pub fn with_composer(mut self, composer: impl MessageComposer + 'static) -> Self {
        self.composer = Box::new(composer);
        self
    }

    /// Builder method to inject a retention policy.
    #[must_use]
    pub fn with_retention(mut self, retention: impl RetentionPolicy + 'static) -> Self {
        self.retention = Box::new(retention);
        self
    }

    /// Builder method to inject a diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
