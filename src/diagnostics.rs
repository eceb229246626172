//! Advisory diagnostics: non-fatal conditions reported beside a result
//!
//! An operation that recovers with a documented default still completes;
//! it records a [`Diagnostic`] so hosts and tests can observe what happened.
//! Each diagnostic is also emitted through `tracing` at warn level.
//! A session keeps at most [`DEFAULT_LIMIT`] entries, dropping the oldest.

use std::collections::VecDeque;
use std::fmt;

/// Default number of diagnostics kept per session
pub const DEFAULT_LIMIT: usize = 100;

/// What kind of advisory condition occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A missing optional argument was replaced by its default
    DefaultApplied,
    /// An edit changed the gradient kind (e.g. degrees on a radial gradient)
    KindMismatch,
    /// A gradient-only operation was called on a solid value
    NotGradient,
    /// A constructed color was invalid and the edit was discarded
    InvalidColor,
    /// A delete would have left fewer than two stops
    MinStops,
    /// The input value could not be parsed
    InvalidInput,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::DefaultApplied => "default-applied",
            DiagnosticKind::KindMismatch => "kind-mismatch",
            DiagnosticKind::NotGradient => "not-gradient",
            DiagnosticKind::InvalidColor => "invalid-color",
            DiagnosticKind::MinStops => "min-stops",
            DiagnosticKind::InvalidInput => "invalid-input",
        };
        f.write_str(name)
    }
}

/// A single advisory message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Collected diagnostics for one session, oldest first
#[derive(Debug, Clone)]
pub struct Diagnostics {
    entries: VecDeque<Diagnostic>,
    limit: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit: limit.max(1) }
    }

    /// Record and log an advisory condition.
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(kind, message);
        tracing::warn!(kind = %diagnostic.kind, "{}", diagnostic.message);
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(diagnostic);
    }

    pub fn entries(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.entries.back()
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Remove and return everything collected so far
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.entries.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
