//! Core types, payload values, and argument normalization for Sagascope.
//!
//! This crate provides:
//! - [`Value`] - The payload value model for observed effects
//! - [`EffectId`], [`EffectKind`], [`EffectStatus`] - The effect vocabulary
//! - [`normalize`] - Total reduction of payloads to printable primitives
//! - [`Error`] - Rich error types with constructor helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod effect;
pub mod error;
pub mod normalize;
pub mod value;

pub use effect::{EffectId, EffectKind, EffectStatus};
pub use error::{Error, ErrorKind, Result};
pub use normalize::normalize;
pub use value::{FnRef, Value, ValueMap};
