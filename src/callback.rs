//! The listener interface that receives parse events.
//!
//! The parser never builds a netlist itself. Instead it calls the methods of a
//! [`Callback`] in textual order; the implementor decides what to build.
//!
//! For each model the calls arrive as:
//!
//! ```text
//! start_model
//!   { inputs | outputs
//!   | start_names { single_output_cover_row } end_names
//!   | start_subckt { port_connection } end_subckt
//!   | latch | blackbox
//!   | conn | cname | attr | param }
//! end_model
//! ```
//!
//! `end_names` and `end_subckt` are issued lazily, when the next directive
//! (or the end of the input) closes the block.

use crate::types::{LatchType, LogicValue};

/// Receiver of parse events.
pub trait Callback {
    /// Name of the file being parsed (only called by the path entry point).
    fn filename(&mut self, _name: &str) {}

    /// Line number of the logical line about to be dispatched.
    fn lineno(&mut self, _line: usize) {}

    fn start_model(&mut self, name: &str);
    fn inputs(&mut self, inputs: &[&str]);
    fn outputs(&mut self, outputs: &[&str]);

    /// Header of a truth table. The last connection is the output.
    fn start_names(&mut self, connections: &[&str]);
    /// One row: one value per input connection followed by the output value.
    fn single_output_cover_row(&mut self, row: &[LogicValue]);
    fn end_names(&mut self);

    /// A latch. `control` is `None` when the line carries no type/control pair,
    /// `init` is [`LogicValue::Unknown`] when no initial value is given.
    fn latch(
        &mut self,
        input: &str,
        output: &str,
        kind: LatchType,
        control: Option<&str>,
        init: LogicValue,
    );

    fn start_subckt(&mut self, model: &str);
    fn port_connection(&mut self, port: &str, net: &str);
    fn end_subckt(&mut self);

    fn blackbox(&mut self);

    fn end_model(&mut self);

    /// Extended BLIF `.conn`.
    fn conn(&mut self, _src: &str, _dst: &str) {}
    /// Extended BLIF `.cname`.
    fn cname(&mut self, _name: &str) {}
    /// Extended BLIF `.attr`.
    fn attr(&mut self, _name: &str, _value: &str) {}
    /// Extended BLIF `.param`.
    fn param(&mut self, _name: &str, _value: &str) {}

    /// Called once after the last line of a parse that was not aborted.
    fn finish_parse(&mut self) {}
}
