//! Payload value model for observed effects.
//!
//! Effect payloads arrive from the host runtime as semi-structured data:
//! function references with argument lists, actions with a `type` field,
//! labeled sub-effect mappings. [`Value`] is the closed set of shapes the
//! engine accepts; everything downstream (normalization, message synthesis,
//! snapshots) navigates it through `Option`-returning accessors so a
//! malformed payload degrades instead of panicking.

use std::fmt;
use std::sync::Arc;

// =============================================================================
// Value
// =============================================================================

/// A payload value: scalar, ordered sequence, keyed mapping, or callable.
///
/// Mappings preserve insertion order; the first key of a settled race result
/// identifies the winning branch, so ordering is load-bearing, not cosmetic.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// The absent value.
    Nil,
    /// Boolean scalar.
    Bool(bool),
    /// 64-bit signed integer scalar.
    Int(i64),
    /// 64-bit floating point scalar.
    Float(f64),
    /// Text scalar.
    Str(Arc<str>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Insertion-ordered keyed mapping.
    Map(ValueMap),
    /// Function reference with an optional declared name.
    Func(FnRef),
}

impl Value {
    /// Returns true for the scalar values the normalizer collapses to the
    /// empty string: `Nil`, `false`, `0`, `0.0`, and `""`.
    ///
    /// Sequences and mappings are never falsy, even when empty.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Nil | Self::Bool(false) => true,
            Self::Int(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a mapping reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a sequence reference.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Attempts to extract a function reference.
    #[must_use]
    pub const fn as_func(&self) -> Option<&FnRef> {
        match self {
            Self::Func(f) => Some(f),
            _ => None,
        }
    }

    /// Looks up a key in a mapping value.
    ///
    /// Returns `None` when this value is not a mapping or the key is absent,
    /// so dotted-path navigation composes with `and_then`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Looks up an element of a sequence value by index.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// The declared name of a callable value, when it has one.
    #[must_use]
    pub fn func_name(&self) -> Option<&str> {
        self.as_func().and_then(FnRef::name)
    }
}

// Float equality uses bit patterns so `Eq` stays reflexive for NaN.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => f.debug_list().entries(items).finish(),
            Self::Map(m) => write!(f, "{m:?}"),
            Self::Func(func) => write!(f, "{func:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => write!(f, "{m}"),
            Self::Func(func) => write!(f, "{func}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl From<FnRef> for Value {
    fn from(f: FnRef) -> Self {
        Self::Func(f)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Value Map
// =============================================================================

/// An insertion-ordered string-keyed mapping.
///
/// Lookup is a linear scan; payload mappings are small (a handful of keys)
/// and first-key extraction must be deterministic.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueMap(Vec<(Arc<str>, Value)>);

impl ValueMap {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an entry, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<Arc<str>>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Builder form of [`ValueMap::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| &**k == key).map(|(_, v)| v)
    }

    /// Returns the first-inserted key, if any.
    ///
    /// A settled race result is a single-key mapping; its first key names
    /// the winning branch.
    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.0.first().map(|(k, _)| &**k)
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (&**k, v))
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (&**k, v)))
            .finish()
    }
}

impl fmt::Display for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<Arc<str>>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// =============================================================================
// Function Reference
// =============================================================================

/// A reference to a host-runtime callable.
///
/// The engine never invokes these; it only carries the declared name so the
/// normalizer and message synthesizer can render it.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FnRef {
    name: Option<Arc<str>>,
}

impl FnRef {
    /// Creates a reference to a named function.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Creates a reference to an anonymous function.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { name: None }
    }

    /// Returns the declared name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Debug for FnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fn {name}>"),
            None => write!(f, "<fn>"),
        }
    }
}

impl fmt::Display for FnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().unwrap_or(""))
    }
}

// =============================================================================
// Tests
// =============================================================================
