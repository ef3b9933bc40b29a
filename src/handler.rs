//! Pluggable error reporting.
//!
//! Every grammar violation is handed to an [`ErrorHandler`] at the point of
//! detection. Returning `Ok(())` skips the offending line and resumes at the
//! next one; returning `Err` stops the parse and the parser's entry point
//! returns that error.
//!
//! The handler is owned by the [`BlifParser`](crate::blif::BlifParser) that
//! uses it, so replacing it never affects other parsers.

use std::process;

use crate::error::{BlifError, Diagnostic, Result};

/// Sink for grammar diagnostics.
pub trait ErrorHandler {
    /// Report one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()>;
}

impl<F> ErrorHandler for F
where
    F: FnMut(&Diagnostic) -> Result<()>,
{
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self(diagnostic)
    }
}

/// Prints the diagnostic to stderr and terminates the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        eprintln!("{}", diagnostic);
        process::exit(1);
    }
}

/// Turns the first diagnostic into [`BlifError::Syntax`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl ErrorHandler for FailFast {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        Err(BlifError::syntax(diagnostic))
    }
}

/// Records every diagnostic and keeps parsing.
#[derive(Debug, Clone, Default)]
pub struct CollectDiagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl CollectDiagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics reported so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take the recorded diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl ErrorHandler for CollectDiagnostics {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.diagnostics.push(diagnostic.clone());
        Ok(())
    }
}
