//! Directive dispatcher and grammar rules.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use super::context::{ModelState, OpenBlock};
use super::lexer::{tokenize, Token, TokenKind};
use super::lines::{LineAssembler, LogicalLine};
use crate::callback::Callback;
use crate::error::{BlifError, Diagnostic, DiagnosticKind, Result};
use crate::handler::{DefaultErrorHandler, ErrorHandler};
use crate::types::{Directive, LatchType, LogicValue};

/// Parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept the extended BLIF directives `.conn`, `.cname`, `.attr` and `.param`.
    pub extensions: bool,
    /// Abort with [`BlifError::TooManyErrors`] after this many diagnostics.
    pub max_errors: Option<usize>,
}

impl ParserConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable extended BLIF directives.
    pub fn with_extensions(mut self, extensions: bool) -> Self {
        self.extensions = extensions;
        self
    }

    /// Stop parsing once `max_errors` diagnostics have been reported.
    ///
    /// Only matters with a handler that keeps going, such as
    /// [`CollectDiagnostics`](crate::handler::CollectDiagnostics).
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }
}

/// Summary of a completed parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Logical lines read (comments and blank lines excluded)
    pub logical_lines: usize,
    /// Physical lines read
    pub physical_lines: usize,
    /// Models closed by `.end`
    pub models: usize,
    /// Diagnostics passed to the error handler
    pub diagnostics: usize,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics == 0
    }
}

/// BLIF parser.
///
/// Owns its configuration and error handler; each `parse_*` call is an
/// independent run with fresh model state.
#[derive(Debug, Clone, Default)]
pub struct BlifParser<H = DefaultErrorHandler> {
    config: ParserConfig,
    handler: H,
}

impl BlifParser<DefaultErrorHandler> {
    /// Create a parser with the default configuration and error handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration and the default error handler.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            handler: DefaultErrorHandler,
        }
    }
}

impl<H: ErrorHandler> BlifParser<H> {
    /// Replace the error handler.
    pub fn with_error_handler<E: ErrorHandler>(self, handler: E) -> BlifParser<E> {
        BlifParser {
            config: self.config,
            handler,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Parse BLIF text held in memory.
    pub fn parse_str(&mut self, input: &str, callback: &mut dyn Callback) -> Result<ParseReport> {
        self.parse_reader(input.as_bytes(), callback)
    }

    /// Parse the BLIF file at `path`.
    pub fn parse_file(
        &mut self,
        path: impl AsRef<Path>,
        callback: &mut dyn Callback,
    ) -> Result<ParseReport> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading BLIF file");
        let file = File::open(path).map_err(|source| BlifError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;
        callback.filename(&path.display().to_string());
        self.parse_reader(BufReader::new(file), callback)
    }

    /// Parse BLIF from an already open stream.
    pub fn parse_reader<R: BufRead>(
        &mut self,
        reader: R,
        callback: &mut dyn Callback,
    ) -> Result<ParseReport> {
        let mut lines = LineAssembler::new(reader);
        let mut engine = Engine {
            config: &self.config,
            handler: &mut self.handler,
            state: ModelState::new(),
            report: ParseReport::default(),
        };

        debug!(extensions = self.config.extensions, "parsing BLIF");
        while let Some(line) = lines.next_line()? {
            engine.report.logical_lines += 1;
            engine.dispatch(&line, callback)?;
        }
        engine.finish(callback)?;

        let report = ParseReport {
            physical_lines: lines.physical_lines(),
            ..engine.report
        };
        debug!(
            logical_lines = report.logical_lines,
            models = report.models,
            diagnostics = report.diagnostics,
            "finished BLIF parse"
        );
        Ok(report)
    }
}

/// A grammar violation before it is tied to a line.
#[derive(Debug)]
struct Violation {
    kind: DiagnosticKind,
    message: String,
}

impl Violation {
    fn structural(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Structural,
            message: message.into(),
        }
    }

    fn arity(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Arity,
            message: message.into(),
        }
    }

    fn lexical(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            message: message.into(),
        }
    }

    fn at(self, line: &LogicalLine) -> Diagnostic {
        Diagnostic::new(self.kind, line.line, line.text.as_str(), self.message)
    }
}

type RuleResult = std::result::Result<(), Violation>;

/// Per-parse state: model context, counters and the borrowed handler.
struct Engine<'p, H> {
    config: &'p ParserConfig,
    handler: &'p mut H,
    state: ModelState,
    report: ParseReport,
}

impl<'p, H: ErrorHandler> Engine<'p, H> {
    fn dispatch(&mut self, line: &LogicalLine, callback: &mut dyn Callback) -> Result<()> {
        if line.unterminated {
            let violation =
                Violation::structural("line continuation not terminated before end of input");
            return self.emit(violation.at(line));
        }
        if line.invalid_utf8 {
            return self.emit(Violation::lexical("line is not valid UTF-8").at(line));
        }

        let tokens = tokenize(&line.text);
        let Some(first) = tokens.first() else {
            return Ok(());
        };
        callback.lineno(line.line);

        let outcome = match first.kind {
            TokenKind::Directive => match self.recognize(first.text) {
                Some(directive) => {
                    trace!(line = line.line, %directive, state = ?self.state.state(), "dispatch");
                    // every recognized directive ends an open .names/.subckt block
                    self.state.close_block(callback);
                    if !directive.is_cell_attribute() {
                        self.state.end_cell();
                    }
                    self.directive(directive, &tokens[1..], line, callback)
                }
                None => Err(Violation::lexical(format!(
                    "unrecognized directive '{}'",
                    first.text
                ))),
            },
            TokenKind::Word => self.cover_row(&tokens, callback),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(violation) => self.emit(violation.at(line)),
        }
    }

    fn recognize(&self, keyword: &str) -> Option<Directive> {
        Directive::from_keyword(keyword).filter(|d| self.config.extensions || !d.is_extension())
    }

    fn directive(
        &mut self,
        directive: Directive,
        args: &[Token<'_>],
        line: &LogicalLine,
        callback: &mut dyn Callback,
    ) -> RuleResult {
        match directive {
            Directive::Model => self.model(args, line, callback),
            Directive::Inputs => {
                self.require_model(directive)?;
                callback.inputs(&texts(args));
                Ok(())
            }
            Directive::Outputs => {
                self.require_model(directive)?;
                callback.outputs(&texts(args));
                Ok(())
            }
            Directive::Names => self.names(args, callback),
            Directive::Latch => self.latch(args, callback),
            Directive::Subckt => self.subckt(args, callback),
            Directive::Blackbox => {
                self.require_model(directive)?;
                expect_no_args(directive, args)?;
                callback.blackbox();
                Ok(())
            }
            Directive::End => self.end(args, callback),
            Directive::Conn => {
                self.require_model(directive)?;
                match args {
                    [src, dst] => {
                        callback.conn(src.text, dst.text);
                        Ok(())
                    }
                    _ => Err(Violation::arity(format!(
                        ".conn expects <src> <dst>, got {} field(s)",
                        args.len()
                    ))),
                }
            }
            Directive::Cname => {
                self.require_model(directive)?;
                self.require_cell(directive)?;
                match args {
                    [name] => {
                        callback.cname(name.text);
                        Ok(())
                    }
                    _ => Err(Violation::arity(format!(
                        ".cname expects one name, got {} field(s)",
                        args.len()
                    ))),
                }
            }
            Directive::Attr | Directive::Param => {
                self.require_model(directive)?;
                self.require_cell(directive)?;
                match args {
                    [name, value] if directive == Directive::Attr => {
                        callback.attr(name.text, value.text);
                        Ok(())
                    }
                    [name, value] => {
                        callback.param(name.text, value.text);
                        Ok(())
                    }
                    _ => Err(Violation::arity(format!(
                        "{} expects <name> <value>, got {} field(s)",
                        directive,
                        args.len()
                    ))),
                }
            }
        }
    }

    fn require_model(&self, directive: Directive) -> RuleResult {
        if self.state.model().is_some() {
            Ok(())
        } else {
            Err(Violation::structural(format!(
                "{} outside of a model (missing .model)",
                directive
            )))
        }
    }

    fn require_cell(&self, directive: Directive) -> RuleResult {
        if self.state.model().is_some_and(|ctx| ctx.after_cell) {
            Ok(())
        } else {
            Err(Violation::structural(format!(
                "{} must directly follow a .names, .latch or .subckt",
                directive
            )))
        }
    }

    fn model(
        &mut self,
        args: &[Token<'_>],
        line: &LogicalLine,
        callback: &mut dyn Callback,
    ) -> RuleResult {
        if let Some(ctx) = self.state.model() {
            return Err(Violation::structural(format!(
                ".model inside model '{}' opened at line {} (missing .end)",
                ctx.name, ctx.line
            )));
        }
        match args {
            [name] => {
                self.state.open_model(name.text, line.line, &line.text);
                callback.start_model(name.text);
                Ok(())
            }
            [] => Err(Violation::arity(".model requires a model name")),
            [name, extra, ..] => Err(Violation::arity(format!(
                "unexpected '{}' after model name '{}'",
                extra.text, name.text
            ))),
        }
    }

    fn names(&mut self, args: &[Token<'_>], callback: &mut dyn Callback) -> RuleResult {
        self.require_model(Directive::Names)?;
        if args.is_empty() {
            return Err(Violation::arity(".names requires at least one connection"));
        }
        let connections = texts(args);
        callback.start_names(&connections);
        self.state.open_block(OpenBlock::Names {
            arity: connections.len() - 1,
        });
        Ok(())
    }

    fn cover_row(&mut self, tokens: &[Token<'_>], callback: &mut dyn Callback) -> RuleResult {
        let Some(arity) = self.state.names_arity() else {
            return Err(if tokens.iter().all(|t| is_cover_text(t.text)) {
                Violation::structural("cover row outside of a .names block")
            } else {
                Violation::lexical(format!("unrecognized directive '{}'", tokens[0].text))
            });
        };

        let mut row = Vec::with_capacity(arity + 1);
        for token in tokens {
            for symbol in token.text.chars() {
                let value = LogicValue::from_cover_symbol(symbol).ok_or_else(|| {
                    Violation::lexical(format!(
                        "invalid cover symbol '{}' (expected 0, 1 or -)",
                        symbol
                    ))
                })?;
                row.push(value);
            }
        }

        if row.len() != arity + 1 {
            return Err(Violation::arity(format!(
                "expected {} cover symbols ({} input(s) + 1 output), got {}",
                arity + 1,
                arity,
                row.len()
            )));
        }

        callback.single_output_cover_row(&row);
        Ok(())
    }

    fn latch(&mut self, args: &[Token<'_>], callback: &mut dyn Callback) -> RuleResult {
        self.require_model(Directive::Latch)?;
        let [input, output, rest @ ..] = args else {
            return Err(Violation::arity(".latch requires an input and an output"));
        };

        let (kind, control, init) = match rest {
            [] => (LatchType::Unspecified, None, LogicValue::Unknown),
            [field] => match LogicValue::from_latch_init(field.text) {
                Some(init) => (LatchType::Unspecified, None, init),
                None if LatchType::from_keyword(field.text).is_some() => {
                    return Err(Violation::arity(format!(
                        "latch type '{}' requires a control signal",
                        field.text
                    )));
                }
                None => {
                    return Err(Violation::lexical(format!(
                        "invalid latch type or initial value '{}'",
                        field.text
                    )));
                }
            },
            [kind, control] => (latch_type(kind)?, Some(control.text), LogicValue::Unknown),
            [kind, control, init] => (latch_type(kind)?, Some(control.text), latch_init(init)?),
            _ => {
                return Err(Violation::arity(
                    "too many fields (expected <input> <output> [<type> <control>] [<init>])",
                ));
            }
        };

        callback.latch(input.text, output.text, kind, control, init);
        self.state.mark_cell();
        Ok(())
    }

    fn subckt(&mut self, args: &[Token<'_>], callback: &mut dyn Callback) -> RuleResult {
        self.require_model(Directive::Subckt)?;
        let Some((model, pairs)) = args.split_first().filter(|(m, _)| !m.text.contains('=')) else {
            return Err(Violation::arity(".subckt requires a model name"));
        };
        if pairs.is_empty() {
            return Err(Violation::arity(format!(
                ".subckt '{}' has no port connections",
                model.text
            )));
        }

        // validate every pair before emitting anything
        let mut connections = Vec::with_capacity(pairs.len());
        for pair in pairs {
            match pair.text.split_once('=') {
                Some((port, net)) if !port.is_empty() && !net.is_empty() => {
                    connections.push((port, net))
                }
                _ => {
                    return Err(Violation::arity(format!(
                        "malformed port connection '{}' (expected <port>=<net>)",
                        pair.text
                    )));
                }
            }
        }

        callback.start_subckt(model.text);
        for (port, net) in connections {
            callback.port_connection(port, net);
        }
        self.state.open_block(OpenBlock::Subckt);
        Ok(())
    }

    fn end(&mut self, args: &[Token<'_>], callback: &mut dyn Callback) -> RuleResult {
        if self.state.model().is_none() {
            return Err(Violation::structural(".end without a matching .model"));
        }
        expect_no_args(Directive::End, args)?;
        if let Some(ctx) = self.state.close_model() {
            trace!(model = %ctx.name, "closed model");
        }
        callback.end_model();
        self.report.models += 1;
        Ok(())
    }

    /// Close whatever is still open at end of input.
    fn finish(&mut self, callback: &mut dyn Callback) -> Result<()> {
        self.state.close_block(callback);
        if let Some(ctx) = self.state.close_model() {
            let diagnostic = Diagnostic::new(
                DiagnosticKind::Structural,
                ctx.line,
                ctx.text,
                format!("model '{}' is not terminated by .end", ctx.name),
            );
            self.emit(diagnostic)?;
        }
        callback.finish_parse();
        Ok(())
    }

    fn emit(&mut self, diagnostic: Diagnostic) -> Result<()> {
        self.report.diagnostics += 1;
        debug!(
            line = diagnostic.line,
            kind = %diagnostic.kind,
            message = %diagnostic.message,
            "BLIF diagnostic"
        );
        self.handler.report(&diagnostic)?;
        match self.config.max_errors {
            Some(limit) if self.report.diagnostics >= limit => Err(BlifError::TooManyErrors {
                count: self.report.diagnostics,
            }),
            _ => Ok(()),
        }
    }
}

fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
    tokens.iter().map(|t| t.text).collect()
}

fn is_cover_text(text: &str) -> bool {
    text.chars().all(|c| LogicValue::from_cover_symbol(c).is_some())
}

fn expect_no_args(directive: Directive, args: &[Token<'_>]) -> RuleResult {
    match args.first() {
        None => Ok(()),
        Some(extra) => Err(Violation::arity(format!(
            "unexpected '{}' after {}",
            extra.text, directive
        ))),
    }
}

fn latch_type(token: &Token<'_>) -> std::result::Result<LatchType, Violation> {
    LatchType::from_keyword(token.text).ok_or_else(|| {
        Violation::lexical(format!(
            "invalid latch type '{}' (expected fe, re, ah, al or as)",
            token.text
        ))
    })
}

fn latch_init(token: &Token<'_>) -> std::result::Result<LogicValue, Violation> {
    LogicValue::from_latch_init(token.text).ok_or_else(|| {
        Violation::lexical(format!(
            "invalid latch initial value '{}' (expected 0, 1, 2 or 3)",
            token.text
        ))
    })
}
