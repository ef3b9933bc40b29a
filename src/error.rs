//! Error types for the BLIF parser.
//!
//! This module provides the crate-wide error type [`BlifError`] together with
//! [`Diagnostic`], the value handed to an [`ErrorHandler`](crate::handler::ErrorHandler)
//! for every grammar violation found in the input.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`BlifError`].
pub type Result<T> = std::result::Result<T, BlifError>;

/// Unified error type for all parser operations.
#[derive(Error, Debug)]
pub enum BlifError {
    // ============ Grammar Errors ============
    /// A grammar violation that the installed handler turned into a failure
    #[error("Parse error at line {line} near '{near_text}': {message}")]
    Syntax {
        line: usize,
        near_text: String,
        message: String,
        kind: DiagnosticKind,
    },

    /// The configured diagnostic limit was reached
    #[error("Too many errors ({count}), giving up")]
    TooManyErrors { count: usize },

    // ============ I/O Errors ============
    /// Error opening a BLIF file
    #[error("Failed to read BLIF file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading from the input stream
    #[error("I/O error while reading BLIF input: {0}")]
    Io(#[from] std::io::Error),
}

impl BlifError {
    /// Create a syntax error from a diagnostic
    pub fn syntax(diagnostic: &Diagnostic) -> Self {
        Self::Syntax {
            line: diagnostic.line,
            near_text: diagnostic.near_text.clone(),
            message: diagnostic.message.clone(),
            kind: diagnostic.kind,
        }
    }

    /// Line number of a syntax error, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Broad class of a grammar violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Directive used outside its required context, unterminated model or
    /// unterminated line continuation
    Structural,
    /// Wrong number of fields, or a malformed `port=net` pair
    Arity,
    /// Unknown symbol, latch type or directive keyword
    Lexical,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Arity => write!(f, "arity"),
            Self::Lexical => write!(f, "lexical"),
        }
    }
}

/// A single grammar violation, reported against one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// First physical line of the offending logical line (1-indexed)
    pub line: usize,
    /// The offending logical line, verbatim
    pub near_text: String,
    /// Human readable description
    pub message: String,
    /// Error class
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        line: usize,
        near_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            near_text: near_text.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blif Error line {} near '{}': {}",
            self.line, self.near_text, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticKind::Arity, 5, "000", "expected 2 symbols, got 3");
        assert_eq!(
            diag.to_string(),
            "Blif Error line 5 near '000': expected 2 symbols, got 3"
        );
    }

    #[test]
    fn test_syntax_error_keeps_location() {
        let diag = Diagnostic::new(DiagnosticKind::Structural, 3, ".end", "no open model");
        let err = BlifError::syntax(&diag);
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("line 3"));
        assert!(matches!(
            err,
            BlifError::Syntax {
                kind: DiagnosticKind::Structural,
                ..
            }
        ));
    }
}
