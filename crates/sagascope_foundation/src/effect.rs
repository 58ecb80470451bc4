//! Effect identifiers, kinds, and lifecycle statuses.

use std::fmt;
use std::sync::Arc;

// =============================================================================
// Effect Id
// =============================================================================

/// Opaque effect identifier assigned by the host runtime.
///
/// Ids are unique for the lifetime of the observed process; the engine never
/// allocates them itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EffectId(u64);

impl EffectId {
    /// Creates an effect id from the host runtime's raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EffectId({})", self.0)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

impl From<u64> for EffectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// =============================================================================
// Effect Kind
// =============================================================================

/// The declarative instruction kind carried by an effect descriptor.
///
/// The well-known kinds mirror the host runtime's effect creators. Runtime
/// extensions arrive as [`EffectKind::Other`] and flow through the engine
/// with the same rules as any unknown tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EffectKind {
    /// Wait for a matching action.
    Take,
    /// Dispatch an action.
    Put,
    /// Invoke a function and await its result.
    Call,
    /// Spawn a sub-computation that settles independently.
    Fork,
    /// Run labeled sub-effects; the first to settle wins.
    Race,
    /// Run labeled sub-effects; all must settle.
    All,
    /// Read from the host store.
    Select,
    /// Cancel a running task.
    Cancel,
    /// Query whether the current task was cancelled.
    Cancelled,
    /// The distinguished root saga record.
    Root,
    /// Runtime-specific tag not covered above.
    Other(Arc<str>),
}

impl EffectKind {
    /// Returns the canonical upper-case tag for this kind.
    ///
    /// Unknown tags render verbatim, whatever case the runtime supplied.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Take => "TAKE",
            Self::Put => "PUT",
            Self::Call => "CALL",
            Self::Fork => "FORK",
            Self::Race => "RACE",
            Self::All => "ALL",
            Self::Select => "SELECT",
            Self::Cancel => "CANCEL",
            Self::Cancelled => "CANCELLED",
            Self::Root => "ROOT",
            Self::Other(tag) => tag,
        }
    }

    /// Maps a raw runtime tag to a kind.
    ///
    /// Recognized tags are matched case-sensitively (the runtime emits them
    /// upper-case); anything else becomes [`EffectKind::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TAKE" => Self::Take,
            "PUT" => Self::Put,
            "CALL" => Self::Call,
            "FORK" => Self::Fork,
            "RACE" => Self::Race,
            "ALL" => Self::All,
            "SELECT" => Self::Select,
            "CANCEL" => Self::Cancel,
            "CANCELLED" => Self::Cancelled,
            "ROOT" => Self::Root,
            other => Self::Other(other.into()),
        }
    }

    /// Returns true for kinds that orchestrate control flow rather than
    /// perform an observable action.
    ///
    /// Structural kinds are never the subject of a synthesized causal
    /// message; they only appear as context.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::Take
                | Self::Fork
                | Self::Race
                | Self::All
                | Self::Cancelled
                | Self::Cancel
        )
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Effect Status
// =============================================================================

/// Lifecycle status of a tracked effect.
///
/// Every record starts `Pending`; the three terminal states are mutually
/// exclusive and reachable only from `Pending`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EffectStatus {
    /// Triggered, not yet settled.
    Pending,
    /// Settled with a result.
    Resolved,
    /// Settled with an error.
    Rejected,
    /// Cancelled before settling.
    Cancelled,
}

impl EffectStatus {
    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for EffectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Resolved => write!(f, "RESOLVED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
