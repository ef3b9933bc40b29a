//! BLIF pretty printer.
//!
//! [`BlifWriter`] is a [`Callback`] that writes the events it receives back
//! out as normalized BLIF: one directive per logical line, single spaces
//! between fields, and long lines wrapped with `\` continuations.

use std::io::{self, Write};

use crate::callback::Callback;
use crate::types::{LatchType, LogicValue};

/// Default wrap column for long directive lines.
pub const DEFAULT_LINE_WIDTH: usize = 80;

const CONTINUATION_INDENT: &str = "    ";

/// Writes parse events as BLIF text.
///
/// Callbacks cannot fail, so the first I/O error is held and returned by
/// [`BlifWriter::finish`]; everything after it is dropped.
pub struct BlifWriter<W: Write> {
    out: W,
    line_width: usize,
    subckt: Option<Vec<String>>,
    models_written: usize,
    error: Option<io::Error>,
}

impl<W: Write> BlifWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_width: DEFAULT_LINE_WIDTH,
            subckt: None,
            models_written: 0,
            error: None,
        }
    }

    /// Set the column after which lines are wrapped. `0` disables wrapping.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Flush and return the underlying writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_words<S: AsRef<str>>(&mut self, words: &[S]) {
        if self.error.is_some() {
            return;
        }
        let text = wrap(words, self.line_width);
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            self.error = Some(err);
        }
    }
}

/// Join `words` into one logical line, breaking before any word that would
/// run past `width`.
fn wrap<S: AsRef<str>>(words: &[S], width: usize) -> String {
    let mut text = String::new();
    let mut column = 0;
    for (i, word) in words.iter().enumerate() {
        let word = word.as_ref();
        if i > 0 {
            if width > 0 && column + 1 + word.len() + 2 > width {
                text.push_str(" \\\n");
                text.push_str(CONTINUATION_INDENT);
                column = CONTINUATION_INDENT.len();
            } else {
                text.push(' ');
                column += 1;
            }
        }
        text.push_str(word);
        column += word.len();
    }
    text.push('\n');
    text
}

impl<W: Write> Callback for BlifWriter<W> {
    fn start_model(&mut self, name: &str) {
        if self.models_written > 0 {
            self.write_words::<&str>(&[]);
        }
        self.write_words(&[".model", name]);
    }

    fn inputs(&mut self, inputs: &[&str]) {
        let mut words = vec![".inputs"];
        words.extend_from_slice(inputs);
        self.write_words(&words);
    }

    fn outputs(&mut self, outputs: &[&str]) {
        let mut words = vec![".outputs"];
        words.extend_from_slice(outputs);
        self.write_words(&words);
    }

    fn start_names(&mut self, connections: &[&str]) {
        let mut words = vec![".names"];
        words.extend_from_slice(connections);
        self.write_words(&words);
    }

    fn single_output_cover_row(&mut self, row: &[LogicValue]) {
        let (inputs, output) = row.split_at(row.len().saturating_sub(1));
        let output: String = output.iter().map(|v| v.cover_symbol()).collect();
        if inputs.is_empty() {
            self.write_words(&[output]);
        } else {
            let inputs: String = inputs.iter().map(|v| v.cover_symbol()).collect();
            self.write_words(&[inputs, output]);
        }
    }

    fn end_names(&mut self) {}

    fn latch(
        &mut self,
        input: &str,
        output: &str,
        kind: LatchType,
        control: Option<&str>,
        init: LogicValue,
    ) {
        let mut words = vec![".latch".to_string(), input.to_string(), output.to_string()];
        if let Some(keyword) = kind.keyword() {
            words.push(keyword.to_string());
            words.push(control.unwrap_or("NIL").to_string());
        }
        if init != LogicValue::Unknown {
            words.push(init.latch_init_digit().to_string());
        }
        self.write_words(&words);
    }

    fn start_subckt(&mut self, model: &str) {
        self.subckt = Some(vec![".subckt".to_string(), model.to_string()]);
    }

    fn port_connection(&mut self, port: &str, net: &str) {
        if let Some(words) = self.subckt.as_mut() {
            words.push(format!("{}={}", port, net));
        }
    }

    fn end_subckt(&mut self) {
        if let Some(words) = self.subckt.take() {
            self.write_words(&words);
        }
    }

    fn blackbox(&mut self) {
        self.write_words(&[".blackbox"]);
    }

    fn end_model(&mut self) {
        self.write_words(&[".end"]);
        self.models_written += 1;
    }

    fn conn(&mut self, src: &str, dst: &str) {
        self.write_words(&[".conn", src, dst]);
    }

    fn cname(&mut self, name: &str) {
        self.write_words(&[".cname", name]);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.write_words(&[".attr", name, value]);
    }

    fn param(&mut self, name: &str, value: &str) {
        self.write_words(&[".param", name, value]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blif::{BlifParser, ParserConfig};
    use crate::events::EventLog;
    use crate::handler::FailFast;

    fn reprint(input: &str, width: usize) -> String {
        let config = ParserConfig::new().with_extensions(true);
        let mut parser = BlifParser::with_config(config).with_error_handler(FailFast);
        let mut writer = BlifWriter::new(Vec::new()).with_line_width(width);
        parser.parse_str(input, &mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    fn events(input: &str) -> EventLog {
        let config = ParserConfig::new().with_extensions(true);
        let mut parser = BlifParser::with_config(config).with_error_handler(FailFast);
        let mut log = EventLog::new();
        parser.parse_str(input, &mut log).unwrap();
        log
    }

    #[test]
    fn test_normalizes_whitespace() {
        let input = "# and\n.model   top\n.inputs a\tb\n.outputs y\n.names a b y\n1 1 1\n.end\n";
        assert_eq!(
            reprint(input, DEFAULT_LINE_WIDTH),
            ".model top\n.inputs a b\n.outputs y\n.names a b y\n11 1\n.end\n"
        );
    }

    #[test]
    fn test_latch_and_subckt() {
        let input = ".model top\n.latch d q re clk 3\n.latch d2 q2 1\n.subckt inv a=q y=z\n.end\n";
        assert_eq!(
            reprint(input, DEFAULT_LINE_WIDTH),
            ".model top\n.latch d q re clk\n.latch d2 q2 1\n.subckt inv a=q y=z\n.end\n"
        );
    }

    #[test]
    fn test_models_separated_by_blank_line() {
        let out = reprint(".model a\n.end\n.model b\n.blackbox\n.end\n", DEFAULT_LINE_WIDTH);
        assert_eq!(out, ".model a\n.end\n\n.model b\n.blackbox\n.end\n");
    }

    #[test]
    fn test_wrapping_uses_continuations() {
        let nets: Vec<String> = (0..40).map(|i| format!("n{}", i)).collect();
        let input = format!(".model wide\n.inputs {}\n.end\n", nets.join(" "));
        let out = reprint(&input, 30);
        assert!(out.contains(" \\\n"));
        assert!(out.lines().all(|l| l.len() <= 30));
        assert_eq!(events(&out).events(), events(&input).events());
    }

    #[test]
    fn test_reprint_preserves_events() {
        let input = "\
.model top
.inputs a b c
.outputs y
.names a b t
1- 1
-1 1
.names t c y
11 0
.latch y q fe clk 0
.subckt sub i=q o=r
.cname u_sub
.param WIDTH 8
.conn r y2
.end
.model sub
.inputs i
.outputs o
.blackbox
.end
";
        let out = reprint(input, DEFAULT_LINE_WIDTH);
        assert_eq!(events(&out).events(), events(input).events());
    }

    #[test]
    fn test_finish_reports_write_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = BlifWriter::new(Broken);
        writer.start_model("m");
        writer.end_model();
        assert!(writer.finish().is_err());
    }
}
