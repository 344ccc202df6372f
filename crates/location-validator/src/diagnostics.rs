//! Accumulated validation diagnostics.
//!
//! Stages report problems through a [`Scope`] and carry on; nothing here
//! affects control flow. Every event is recorded (for counting and for the
//! final report) and forwarded to `tracing`. Recording is thread safe so the
//! new- and existing-location stages can run concurrently.

use serde::Serialize;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One reported event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Offending values, rendered after the message.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip)]
    pub quoted: bool,
    /// Nesting level, used for indentation.
    pub depth: usize,
}

impl Diagnostic {
    /// Message followed by the comma-joined values.
    pub fn render(&self) -> String {
        if self.values.is_empty() {
            return self.message.clone();
        }
        let joined = self
            .values
            .iter()
            .map(|v| {
                if self.quoted {
                    format!("'{}'", v)
                } else {
                    v.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}{}", self.message, joined)
    }

    /// Rendered text indented by depth.
    pub fn indented(&self) -> String {
        format!("{}{}", "    ".repeat(self.depth), self.render())
    }
}

/// Collector of diagnostics for one load.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Mutex<Vec<Diagnostic>>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level reporting scope.
    pub fn root(&self) -> Scope<'_> {
        Scope {
            sink: self,
            depth: 0,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    /// Snapshot of everything recorded so far, in reporting order.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.records()
            .into_iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// First diagnostic of `severity` whose message contains `needle`.
    pub fn find(&self, severity: Severity, needle: &str) -> Option<Diagnostic> {
        self.records()
            .into_iter()
            .find(|d| d.severity == severity && d.message.contains(needle))
    }

    fn emit(&self, diagnostic: Diagnostic) {
        let text = diagnostic.render();
        match diagnostic.severity {
            Severity::Info => tracing::info!(depth = diagnostic.depth, "{}", text),
            Severity::Warning => {
                self.warnings.fetch_add(1, Ordering::SeqCst);
                tracing::warn!(depth = diagnostic.depth, "{}", text)
            }
            Severity::Error => {
                self.errors.fetch_add(1, Ordering::SeqCst);
                tracing::error!(depth = diagnostic.depth, "{}", text)
            }
        }
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Reporting handle at a fixed nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    sink: &'a Diagnostics,
    depth: usize,
}

impl<'a> Scope<'a> {
    /// Scope one level deeper.
    pub fn nested(&self) -> Scope<'a> {
        Scope {
            sink: self.sink,
            depth: self.depth + 1,
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.report(Severity::Info, message.into(), Vec::new(), false);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.report(Severity::Warning, message.into(), Vec::new(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.report(Severity::Error, message.into(), Vec::new(), false);
    }

    /// Warning followed by a list of offending values.
    pub fn warn_list<I, T>(&self, message: impl Into<String>, values: I, quoted: bool)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.report(Severity::Warning, message.into(), values, quoted);
    }

    /// Error followed by a list of offending values.
    pub fn error_list<I, T>(&self, message: impl Into<String>, values: I, quoted: bool)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.report(Severity::Error, message.into(), values, quoted);
    }

    fn report(&self, severity: Severity, message: String, values: Vec<String>, quoted: bool) {
        self.sink.emit(Diagnostic {
            severity,
            message,
            values,
            quoted,
            depth: self.depth,
        });
    }
}
