//! Argument normalization: reduce payload values to printable primitives.
//!
//! The working store and the message synthesizer never look at live payload
//! data; they see the normalized projection produced here. Normalization is
//! total over [`Value`] and idempotent, so re-normalizing a stored entry is
//! a no-op.

use crate::value::Value;

/// Reduces a payload value to its printable projection.
///
/// Case order matters and is part of the contract:
///
/// 1. Falsy scalars (`Nil`, `false`, `0`, `0.0`, `""`) become the empty
///    string.
/// 2. Sequences normalize element-wise, preserving order.
/// 3. Callables become their declared name, or the empty string when
///    anonymous.
/// 4. Mappings normalize each value recursively, preserving key order.
/// 5. Remaining scalars pass through unchanged.
///
/// Cyclic inputs are unrepresentable in the owned [`Value`] tree, so the
/// function terminates on every input.
#[must_use]
pub fn normalize(value: &Value) -> Value {
    if value.is_falsy() {
        return Value::from("");
    }

    match value {
        Value::List(items) => Value::List(items.iter().map(normalize).collect()),
        Value::Func(f) => Value::from(f.name().unwrap_or("")),
        Value::Map(m) => Value::Map(m.iter().map(|(k, v)| (k, normalize(v))).collect()),
        scalar => scalar.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================
