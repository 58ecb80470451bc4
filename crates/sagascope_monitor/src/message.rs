//! Causal message synthesis.
//!
//! Given a freshly triggered effect and the working-store entry of its
//! parent, the composer produces a one-line human-readable description of
//! the relationship, e.g.
//!
//! ```text
//! watchLogin forked by LOGIN puts LOGIN_SUCCESS
//! ```
//!
//! Synthesis is advisory: every navigation returns `Option`, and any
//! malformed payload shape yields an absent message rather than an error.

use sagascope_foundation::{EffectKind, Value};

use crate::record::EffectDescriptor;
use crate::store::WorkingEntry;

// =============================================================================
// Verb rendering
// =============================================================================

/// Renders an effect kind as a present-tense verb: `CALL` → `"calls"`.
///
/// The rule is a fixed grammatical transformation applied uniformly, unknown
/// kinds included. Irregular results (`TAKE` → `"takes"`, but also
/// `PUT` → `"puts"`, `ALL` → `"alls"`) are accepted as-is.
#[must_use]
pub fn verb(kind: &EffectKind) -> String {
    format!("{}s", kind.name().to_lowercase())
}

/// Renders an effect kind as a past-tense verb: `FORK` → `"forked"`.
///
/// Same uniform suffix rule as [`verb`]; `TAKE` → `"takeed"` is a known
/// cosmetic limitation, not a defect to fix here.
#[must_use]
pub fn past_tense(kind: &EffectKind) -> String {
    format!("{}ed", kind.name().to_lowercase())
}

// =============================================================================
// Message Composer
// =============================================================================

/// Pluggable strategy that turns an effect relationship into a message.
///
/// `current` is the raw descriptor observed at trigger time; `parent` is
/// the normalized working-store entry of its enclosing effect.
pub trait MessageComposer {
    /// Produces the causal description, or `None` when the relationship is
    /// not worth describing.
    fn compose(&self, current: &EffectDescriptor, parent: &WorkingEntry) -> Option<String>;
}

/// The default composer.
///
/// A message is produced only when all of the following hold: the current
/// kind is not structural; the parent entry carries a non-empty function
/// name and a non-empty argument list; and the pair is not self-referential
/// (the parent's first scalar argument naming the very function the current
/// effect invokes).
#[derive(Clone, Copy, Debug, Default)]
pub struct CausalComposer;

impl MessageComposer for CausalComposer {
    fn compose(&self, current: &EffectDescriptor, parent: &WorkingEntry) -> Option<String> {
        if current.kind.is_structural() {
            return None;
        }

        let parent_fn = parent
            .payload
            .get("fn")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())?;
        let parent_args = parent
            .payload
            .get("args")
            .and_then(Value::as_list)
            .filter(|args| !args.is_empty())?;

        if same_one(current, parent_args) {
            return None;
        }

        Some(format!(
            "{parent_fn} {} by {} {} {}",
            past_tense(&parent.kind),
            first_arg_description(parent_args),
            verb(&current.kind),
            subject(current),
        ))
    }
}

/// The name of the function the current effect invokes, if any.
///
/// At trigger time the payload is raw, so `fn` is usually a callable; a
/// normalized descriptor carries the name as a plain string instead, and
/// both shapes are accepted.
fn invoked_name(current: &EffectDescriptor) -> Option<&str> {
    let func = current.payload.get("fn")?;
    func.func_name().or_else(|| func.as_str())
}

/// True when the parent's first scalar argument names the function the
/// current effect invokes, compared case-insensitively.
///
/// This suppresses redundant self-referential chatter, e.g. a `CALL`
/// wrapping a function that forwards to itself. A composite first argument
/// never matches.
fn same_one(current: &EffectDescriptor, parent_args: &[Value]) -> bool {
    let Some(first) = parent_args.first() else {
        return false;
    };
    if matches!(first, Value::Map(_) | Value::List(_)) {
        return false;
    }
    let current_fn = invoked_name(current).unwrap_or("");
    current_fn.to_lowercase() == first.to_string().to_lowercase()
}

/// Describes the parent's first argument.
///
/// A structured action renders its `type` field; a scalar renders itself;
/// anything else renders empty.
fn first_arg_description(parent_args: &[Value]) -> String {
    match parent_args.first() {
        Some(Value::Map(m)) => m.get("type").map(ToString::to_string).unwrap_or_default(),
        Some(Value::List(_)) | None => String::new(),
        Some(scalar) => scalar.to_string(),
    }
}

/// The current effect's subject: its dispatched action type, else its
/// invoked function name, else a placeholder.
fn subject(current: &EffectDescriptor) -> String {
    let action_type = current
        .payload
        .get("action")
        .and_then(|a| a.get("type"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    if let Some(kind) = action_type {
        return kind.to_owned();
    }

    invoked_name(current)
        .filter(|s| !s.is_empty())
        .map_or_else(|| "?".to_owned(), str::to_owned)
}

// =============================================================================
// Tests
// =============================================================================
