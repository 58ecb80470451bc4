//! Diagnostic output sinks.
//!
//! The engine never formats to a terminal itself; gated diagnostic lines
//! and synthesized messages go through a [`DiagnosticSink`]. Console
//! styling and coloring belong to the embedder's sink implementation.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Receives one diagnostic line per gated lifecycle event.
pub trait DiagnosticSink {
    /// Emits a single line.
    fn emit(&mut self, line: &str);
}

/// Writes each line to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, line: &str) {
        let _ = writeln!(io::stderr(), "{line}");
    }
}

/// Collects lines in memory, for tests and embedded inspection.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// monitor owns the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Returns the number of emitted lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_owned());
    }
}

// =============================================================================
// Tests
// =============================================================================
