//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, EffectId, EffectKind, Error, and the
//! argument normalizer.

mod errors;
