//! Logical line assembly.
//!
//! BLIF is line oriented, but a physical line ending in `\` continues on the
//! next one. [`LineAssembler`] joins such runs into one [`LogicalLine`],
//! strips `#` comments and drops blank lines while keeping physical line
//! numbers exact.

use std::borrow::Cow;
use std::io::{self, BufRead};

/// One logical line and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number (1-indexed) of the first joined line
    pub line: usize,
    /// Joined text, comments removed, outer whitespace trimmed
    pub text: String,
    /// The input ended while this line was still being continued
    pub unterminated: bool,
    /// Some byte outside a comment was not valid UTF-8; `text` holds
    /// replacement characters in its place
    pub invalid_utf8: bool,
}

/// Reads logical lines from a buffered reader.
pub struct LineAssembler<R> {
    reader: R,
    physical_line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineAssembler<R> {
    /// Create an assembler positioned at the first line of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            physical_line: 0,
            buf: Vec::new(),
        }
    }

    /// Number of physical lines consumed so far.
    pub fn physical_lines(&self) -> usize {
        self.physical_line
    }

    /// Read the next logical line, or `None` at end of input.
    ///
    /// Lines are decoded one at a time, so a stray non-UTF-8 byte only
    /// affects the logical line it appears in.
    pub fn next_line(&mut self) -> io::Result<Option<LogicalLine>> {
        let mut text = String::new();
        let mut start: Option<usize> = None;
        let mut first_raw = String::new();
        let mut invalid_utf8 = false;

        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(start.map(|line| LogicalLine {
                    line,
                    // a run of bare continuations has nothing else to show
                    text: if text.is_empty() { first_raw } else { text },
                    unterminated: true,
                    invalid_utf8,
                }));
            }
            self.physical_line += 1;

            let code = String::from_utf8_lossy(strip_comment(&self.buf));
            let (piece, continues) = split_continuation(&code);

            if start.is_none() {
                if piece.is_empty() && !continues {
                    continue;
                }
                start = Some(self.physical_line);
                first_raw = String::from_utf8_lossy(&self.buf).trim().to_string();
            }
            invalid_utf8 |= matches!(code, Cow::Owned(_));

            if !piece.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(piece);
            }

            if !continues {
                if text.is_empty() {
                    // a continuation run made only of blanks
                    start = None;
                    continue;
                }
                return Ok(start.map(|line| LogicalLine {
                    line,
                    text,
                    unterminated: false,
                    invalid_utf8,
                }));
            }
        }
    }
}

impl<R: BufRead> Iterator for LineAssembler<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

fn strip_comment(line: &[u8]) -> &[u8] {
    match line.iter().position(|&b| b == b'#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Trim a physical line and detect a trailing continuation marker.
fn split_continuation(line: &str) -> (&str, bool) {
    let trimmed = line.trim_end();
    match trimmed.strip_suffix('\\') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed.trim_start(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<LogicalLine> {
        LineAssembler::new(input.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_simple_lines() {
        let lines = collect(".model top\n.inputs a b\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[0].text, ".model top");
        assert_eq!(lines[1].line, 2);
        assert_eq!(lines[1].text, ".inputs a b");
    }

    #[test]
    fn test_continuation_joins_with_single_space() {
        let lines = collect("a b\\\nc d\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a b c d");
        assert_eq!(lines[0].line, 1);
        assert!(!lines[0].unterminated);
    }

    #[test]
    fn test_continuation_with_trailing_whitespace() {
        let lines = collect(".inputs a \\  \n   b \\\t\n c\nnext\n");
        assert_eq!(lines[0].text, ".inputs a b c");
        assert_eq!(lines[1].line, 4);
        assert_eq!(lines[1].text, "next");
    }

    #[test]
    fn test_comments_and_blanks_consume_line_numbers() {
        let lines = collect("# header\n\n   \n.model m # trailing\n\t# indented\n.end\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 4);
        assert_eq!(lines[0].text, ".model m");
        assert_eq!(lines[1].line, 6);
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = collect(".model m\r\n.inputs a \\\r\n b\r\n");
        assert_eq!(lines[0].text, ".model m");
        assert_eq!(lines[1].text, ".inputs a b");
        assert_eq!(lines[1].line, 2);
    }

    #[test]
    fn test_unterminated_continuation_at_eof() {
        let lines = collect(".model m\n.inputs a \\\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line, 2);
        assert_eq!(lines[1].text, ".inputs a");
        assert!(lines[1].unterminated);
    }

    #[test]
    fn test_missing_final_newline() {
        let lines = collect(".model m\n.end");
        assert_eq!(lines[1].text, ".end");
        assert!(!lines[1].unterminated);
    }

    #[test]
    fn test_lone_continuation_at_eof_keeps_raw_text() {
        let lines = collect(".model m\n.end\n  \\  \n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line, 3);
        assert_eq!(lines[1].text, "\\");
        assert!(lines[1].unterminated);
    }

    #[test]
    fn test_invalid_utf8_is_local_to_its_line() {
        let bytes: &[u8] = b".model m\n.inputs caf\xe9\n.inputs b # r\xe9sum\xe9\n.end\n";
        let lines = LineAssembler::new(bytes)
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(lines.len(), 4);
        assert!(!lines[0].invalid_utf8);
        assert!(lines[1].invalid_utf8);
        assert_eq!(lines[1].text, ".inputs caf\u{FFFD}");
        assert!(!lines[2].invalid_utf8);
        assert_eq!(lines[2].text, ".inputs b");
        assert_eq!(lines[3].line, 4);
    }

    #[test]
    fn test_physical_line_count() {
        let mut assembler = LineAssembler::new("a\n\n# c\nb\n".as_bytes());
        while assembler.next_line().unwrap().is_some() {}
        assert_eq!(assembler.physical_lines(), 4);
    }
}
