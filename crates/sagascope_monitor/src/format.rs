//! Human-readable rendering of inspection snapshots.

use std::collections::HashMap;
use std::fmt::Write;

use sagascope_foundation::{EffectId, Value};

use crate::snapshot::{EffectSnapshot, SagaSnapshot, StoreSnapshot};

// =============================================================================
// Tree Formatter
// =============================================================================

/// Renders a [`SagaSnapshot`] as an indented tree, one effect per line.
///
/// ```text
/// ROOT rootSaga  PENDING
///   FORK watchLogin  RESOLVED 12.0ms
///     PUT LOGIN_SUCCESS  PENDING
///   RACE  RESOLVED 100.0ms
///     [response] CALL fetchUser  RESOLVED 40.0ms (winner)
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeFormatter {
    /// Whether to prefix each line with the effect id.
    pub show_ids: bool,
    /// Whether to append the payload to each line.
    pub show_payloads: bool,
}

impl TreeFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show effect ids.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Builder method to show payloads.
    #[must_use]
    pub fn with_payloads(mut self) -> Self {
        self.show_payloads = true;
        self
    }

    /// Renders the snapshot as an indented tree.
    ///
    /// Effects whose parent is absent from the snapshot are rendered as
    /// additional roots, so a tree can be dumped even mid-bootstrap.
    #[must_use]
    pub fn format(&self, snapshot: &SagaSnapshot) -> String {
        let mut children: HashMap<EffectId, Vec<&EffectSnapshot>> = HashMap::new();
        let mut roots: Vec<&EffectSnapshot> = Vec::new();

        for effect in &snapshot.effects {
            match effect.parent_effect_id {
                Some(parent) if snapshot.get(parent).is_some() => {
                    children.entry(parent).or_default().push(effect);
                }
                _ => roots.push(effect),
            }
        }

        let mut out = String::new();
        for root in roots {
            self.render(root, &children, 0, &mut out);
        }
        out
    }

    fn render(
        &self,
        effect: &EffectSnapshot,
        children: &HashMap<EffectId, Vec<&EffectSnapshot>>,
        depth: usize,
        out: &mut String,
    ) {
        let _ = writeln!(out, "{}", self.format_line(effect, depth));
        if let Some(kids) = children.get(&effect.effect_id) {
            for kid in kids {
                self.render(kid, children, depth + 1, out);
            }
        }
    }

    /// Formats a single effect line at the given depth.
    #[must_use]
    pub fn format_line(&self, effect: &EffectSnapshot, depth: usize) -> String {
        let mut line = String::new();

        if self.show_ids {
            let _ = write!(line, "[{:06}] ", effect.effect_id.raw());
        }
        let _ = write!(line, "{}", "  ".repeat(depth));

        if let Some(label) = &effect.label {
            let _ = write!(line, "[{label}] ");
        }

        let _ = write!(line, "{}", effect.kind);
        let subject = describe(effect);
        if !subject.is_empty() {
            let _ = write!(line, " {subject}");
        }

        let _ = write!(line, "  {}", effect.status);
        if let Some(duration) = effect.duration {
            let _ = write!(line, " {}", format_duration(duration));
        }
        if effect.winner {
            let _ = write!(line, " (winner)");
        }
        if self.show_payloads {
            let _ = write!(line, "  {}", effect.payload);
        }

        line
    }

    /// Renders the working-store dump, one entry per line.
    #[must_use]
    pub fn format_store(&self, snapshot: &StoreSnapshot) -> String {
        let mut out = String::new();
        for entry in &snapshot.entries {
            let parent = entry
                .parent_effect_id
                .map(|p| format!(" parent={p}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{} {}{} {}",
                entry.kind, entry.effect_id, parent, entry.payload
            );
        }
        out
    }
}

/// Picks the most informative subject for an effect line: the invoked
/// function, the root saga, or the dispatched action type.
fn describe(effect: &EffectSnapshot) -> String {
    let payload = &effect.payload;

    let func = payload
        .get("fn")
        .and_then(|f| f.func_name().or_else(|| f.as_str()));
    if let Some(name) = func.filter(|s| !s.is_empty()) {
        return name.to_owned();
    }

    let saga = payload
        .get("saga")
        .and_then(|f| f.func_name().or_else(|| f.as_str()));
    if let Some(name) = saga.filter(|s| !s.is_empty()) {
        return name.to_owned();
    }

    let action = payload
        .get("action")
        .and_then(|a| a.get("type"))
        .and_then(Value::as_str);
    if let Some(kind) = action.filter(|s| !s.is_empty()) {
        return kind.to_owned();
    }

    String::new()
}

/// Formats a millisecond duration: sub-second values in milliseconds,
/// anything longer in seconds.
fn format_duration(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.3}s", ms / 1000.0)
    } else {
        format!("{ms:.1}ms")
    }
}

// =============================================================================
// Tests
// =============================================================================
