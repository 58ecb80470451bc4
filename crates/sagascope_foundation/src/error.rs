//! Error types for the Sagascope engine.
//!
//! Uses `thiserror` for ergonomic error definition. Nothing in this crate
//! or its dependents may propagate an error back into the host runtime's
//! effect path; these types exist so internal failures can be reported as
//! diagnostics instead of panics.

use thiserror::Error;

use crate::effect::EffectId;

/// Convenience result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for engine operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a lookup failure for an unknown effect id.
    #[must_use]
    pub fn not_found(id: EffectId) -> Self {
        Self::new(ErrorKind::NotFound(id))
    }

    /// Creates a malformed-payload error.
    #[must_use]
    pub fn malformed_payload(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPayload(detail.into()))
    }

    /// Creates a race-label mismatch error.
    #[must_use]
    pub fn race_label_mismatch(race: EffectId, label: impl Into<String>) -> Self {
        Self::new(ErrorKind::RaceLabelMismatch {
            race,
            label: label.into(),
        })
    }

    /// Creates an error for a second root registration.
    #[must_use]
    pub fn root_already_set(existing: EffectId) -> Self {
        Self::new(ErrorKind::RootAlreadySet(existing))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Lookup of an effect id the manager has never seen.
    #[error("effect not found: {0}")]
    NotFound(EffectId),

    /// A payload did not have the shape an operation required.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A settled race result named a branch label no child carries.
    #[error("race {race}: no child labeled {label:?}")]
    RaceLabelMismatch {
        /// The race effect whose result was being resolved.
        race: EffectId,
        /// The label extracted from the settled result.
        label: String,
    },

    /// `set_root_effect` was called a second time in the same run.
    #[error("root effect already set: {0}")]
    RootAlreadySet(EffectId),
}

// =============================================================================
// Tests
// =============================================================================
