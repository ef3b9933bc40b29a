//! # blifparse
//!
//! An event-driven parser for Berkeley Logic Interchange Format (BLIF)
//! netlists.
//!
//! The parser does not build a netlist. It reads BLIF text a logical line at
//! a time and reports every construct it recognizes to a caller-supplied
//! [`Callback`], in textual order. Malformed lines are reported to an
//! [`ErrorHandler`] with their line number and text.
//!
//! ## Architecture
//!
//! - [`blif`] - Line assembly, tokenizing, directive dispatch and the model state machine
//! - [`callback`] - The listener trait receiving parse events
//! - [`handler`] - Pluggable error reporting
//! - [`events`] - A listener that records events as values
//! - [`writer`] - A listener that re-emits normalized BLIF
//! - [`types`] - Logic values, latch types and directive keywords
//! - [`error`] - Error and diagnostic types
//!
//! ## Usage
//!
//! ```no_run
//! use blifparse::{BlifParser, CollectDiagnostics, EventLog};
//!
//! let mut parser = BlifParser::new().with_error_handler(CollectDiagnostics::new());
//! let mut log = EventLog::new();
//! parser.parse_file("adder.blif", &mut log)?;
//!
//! for diagnostic in parser.handler().diagnostics() {
//!     eprintln!("{}", diagnostic);
//! }
//! for event in log.events() {
//!     println!("{}", event);
//! }
//! # Ok::<(), blifparse::BlifError>(())
//! ```
//!
//! ### CLI
//!
//! ```bash
//! blifparse adder.blif             # print normalized BLIF
//! blifparse --events adder.blif    # print the callback sequence
//! blifparse --keep-going bad.blif  # report every error, not just the first
//! ```

pub mod blif;
pub mod callback;
pub mod error;
pub mod events;
pub mod handler;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use blif::{parse_file, parse_str, BlifParser, ParseReport, ParserConfig};
pub use callback::Callback;
pub use error::{BlifError, Diagnostic, DiagnosticKind, Result};
pub use events::{Event, EventLog};
pub use handler::{CollectDiagnostics, DefaultErrorHandler, ErrorHandler, FailFast};
pub use types::{Directive, LatchType, LogicValue};
pub use writer::BlifWriter;
