//! blifparse - BLIF netlist checker and pretty printer
//!
//! # Usage
//!
//! ```bash
//! blifparse circuit.blif > normalized.blif
//! blifparse --events --eblif circuit.eblif
//! ```

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use blifparse::{
    error::Result, writer::DEFAULT_LINE_WIDTH, BlifParser, BlifWriter, Callback,
    CollectDiagnostics, EventLog, ParseReport, ParserConfig,
};
use clap::Parser;

/// BLIF netlist parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the BLIF file
    #[arg(value_name = "BLIF_FILE")]
    blif_file: PathBuf,

    /// Accept extended BLIF directives (.conn, .cname, .attr, .param)
    #[arg(long)]
    eblif: bool,

    /// Report every error instead of stopping at the first one
    #[arg(short, long)]
    keep_going: bool,

    /// Give up after this many errors (with --keep-going)
    #[arg(long, value_name = "N")]
    max_errors: Option<usize>,

    /// Print the callback sequence instead of normalized BLIF
    #[arg(long)]
    events: bool,

    /// Wrap output lines at this column (0 disables wrapping)
    #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
    width: usize,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = ParserConfig::new().with_extensions(args.eblif);
    if let Some(limit) = args.max_errors {
        config = config.with_max_errors(limit);
    }

    if args.keep_going {
        let mut parser =
            BlifParser::with_config(config).with_error_handler(CollectDiagnostics::new());
        let outcome = run(&args, |callback| parser.parse_file(&args.blif_file, callback));
        for diagnostic in parser.handler().diagnostics() {
            eprintln!("{}", diagnostic);
        }
        outcome?;
        if !parser.handler().is_empty() {
            return Ok(ExitCode::FAILURE);
        }
    } else {
        let mut parser = BlifParser::with_config(config);
        run(&args, |callback| parser.parse_file(&args.blif_file, callback))?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Drive one parse into the listener selected by `args`.
fn run<F>(args: &Args, parse: F) -> Result<()>
where
    F: FnOnce(&mut dyn Callback) -> Result<ParseReport>,
{
    if args.events {
        let mut log = EventLog::new();
        parse(&mut log)?;
        for event in log.events() {
            println!("{}", event);
        }
    } else {
        let stdout = io::stdout();
        let mut writer = BlifWriter::new(BufWriter::new(stdout.lock())).with_line_width(args.width);
        parse(&mut writer)?;
        writer.finish()?;
    }
    Ok(())
}
