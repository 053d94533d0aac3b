//! Configuration diagnostics
//!
//! The resolver never fails a configuration load. Anything it has to drop or
//! default is reported here instead, through a [`DiagnosticSink`].

use std::fmt;
use std::sync::Mutex;

/// Log target used for every configuration diagnostic
pub const DIAGNOSTIC_TARGET: &str = "cookiegate::config";

/// Kind of configuration defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A pattern has a wildcard that is not anchored at an edge
    UnsupportedWildcard,
    /// The same pattern was configured in two SameSite buckets
    DuplicateName,
    /// The same pattern was configured in all three SameSite buckets
    DuplicateNameAll,
    /// A session enum property carried an unexpected value
    InvalidEnumValue,
    /// An endpoint references a samesite policy id that does not exist
    UnknownSameSiteRef,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnsupportedWildcard => "unsupported-wildcard",
            DiagnosticCode::DuplicateName => "duplicate-name",
            DiagnosticCode::DuplicateNameAll => "duplicate-name-all",
            DiagnosticCode::InvalidEnumValue => "invalid-enum-value",
            DiagnosticCode::UnknownSameSiteRef => "unknown-samesite-ref",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic: what went wrong and on which value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, detail: impl Into<String>) -> Self {
        Self { code, detail: detail.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.detail)
    }
}

/// Receiver for configuration diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);

    /// Deliver a batch, in order
    fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }
}

/// Forwards diagnostics to the `log` facade as warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::warn!(target: DIAGNOSTIC_TARGET, "{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of diagnostics with the given code
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.entries().iter().filter(|d| d.code == code).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut entries) => entries.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }
}
