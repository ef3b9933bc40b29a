//! BLIF reader.
//!
//! BLIF is line oriented. Each logical line is either a directive or, inside
//! a `.names` block, a cover row. The parser reports what it sees through a
//! [`Callback`] and hands grammar violations to an
//! [`ErrorHandler`](crate::handler::ErrorHandler).
//!
//! # Grammar Overview
//!
//! ```text
//! file        = { line }
//! line        = comment | directive | cover_row | empty
//! comment     = '#' { any_char }
//! continuation = '\' newline            (joins two physical lines)
//!
//! directive   = ".model" name
//!             | ".inputs" { net }
//!             | ".outputs" { net }
//!             | ".names" net { net }
//!             | ".latch" net net [ latch_type net ] [ init ]
//!             | ".subckt" name port "=" net { port "=" net }
//!             | ".blackbox"
//!             | ".end"
//! cover_row   = { symbol }                (one symbol per header connection)
//!
//! symbol      = '0' | '1' | '-'
//! latch_type  = "fe" | "re" | "ah" | "al" | "as"
//! init        = '0' | '1' | '2' | '3'
//! ```
//!
//! With [`ParserConfig::extensions`] enabled the extended BLIF directives
//! `.conn <src> <dst>`, `.cname <name>`, `.attr <name> <value>` and
//! `.param <name> <value>` are accepted as well.
//!
//! # Example
//!
//! ```text
//! # 2-input AND gate
//! .model top
//! .inputs a b
//! .outputs y
//! .names a b y
//! 11 1
//! .end
//! ```

mod context;
mod lexer;
mod lines;
mod parser;

pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use lines::{LineAssembler, LogicalLine};
pub use parser::{BlifParser, ParseReport, ParserConfig};

use std::path::Path;

use crate::callback::Callback;
use crate::error::Result;

/// Parse BLIF text with the default configuration.
///
/// Uses [`DefaultErrorHandler`](crate::handler::DefaultErrorHandler): the first
/// grammar violation is printed and terminates the process.
pub fn parse_str(input: &str, callback: &mut dyn Callback) -> Result<ParseReport> {
    BlifParser::new().parse_str(input, callback)
}

/// Parse a BLIF file with the default configuration.
///
/// Uses [`DefaultErrorHandler`](crate::handler::DefaultErrorHandler), like
/// [`parse_str`].
pub fn parse_file(path: impl AsRef<Path>, callback: &mut dyn Callback) -> Result<ParseReport> {
    BlifParser::new().parse_file(path, callback)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::BlifError;
    use crate::events::{Event, EventLog};
    use crate::handler::FailFast;

    const HALF_ADDER: &str = "\
# half adder
.model half_adder
.inputs a b
.outputs s c
.names a b s
01 1
10 1
.names a b c
11 1
.end
";

    #[test]
    fn test_parse_str_valid_input() {
        let mut log = EventLog::new();
        let report = parse_str(HALF_ADDER, &mut log).unwrap();
        assert_eq!(report.models, 1);
        assert_eq!(log.events().first(), Some(&Event::StartModel("half_adder".into())));
        assert_eq!(log.events().last(), Some(&Event::EndModel));
    }

    #[test]
    fn test_file_and_stream_agree() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("half_adder.blif");
        fs::write(&path, HALF_ADDER).expect("Failed to write test file");

        let mut from_file = EventLog::new();
        parse_file(&path, &mut from_file).unwrap();

        let mut from_stream = EventLog::new();
        let mut parser = BlifParser::new().with_error_handler(FailFast);
        let file = fs::File::open(&path).unwrap();
        parser
            .parse_reader(std::io::BufReader::new(file), &mut from_stream)
            .unwrap();

        assert_eq!(from_file.events(), from_stream.events());
    }

    #[test]
    fn test_filename_callback() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("top.blif");
        fs::write(&path, ".model top\n.end\n").expect("Failed to write test file");

        let mut log = EventLog::new();
        BlifParser::new()
            .with_error_handler(FailFast)
            .parse_file(&path, &mut log)
            .unwrap();
        let expected = path.display().to_string();
        assert_eq!(log.source_name(), Some(expected.as_str()));
        assert_eq!(log.events().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut log = EventLog::new();
        let err = parse_file(dir.path().join("nope.blif"), &mut log).unwrap_err();
        assert!(matches!(err, BlifError::FileReadError { .. }));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_invalid_utf8_reported_at_its_line() {
        let mut parser = BlifParser::new().with_error_handler(FailFast);
        let mut log = EventLog::new();
        let bytes: &[u8] = b".model m\n.inputs \xff\xfe\n.end\n";
        let err = parser.parse_reader(bytes, &mut log).unwrap_err();
        assert!(matches!(err, BlifError::Syntax { line: 2, .. }));
        assert_eq!(log.events(), &[Event::StartModel("m".into())]);
    }
}
