//! Sagascope - Effect-lifecycle instrumentation for saga-style runtimes
//!
//! This crate re-exports both layers of the Sagascope system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: sagascope_monitor    — Records, manager, lifecycle, messages
//! Layer 0: sagascope_foundation — Core types (Value, EffectId, Error)
//! ```

pub use sagascope_foundation as foundation;
pub use sagascope_monitor as monitor;
