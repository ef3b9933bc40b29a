//! Model nesting state machine.
//!
//! ```text
//!              .model                 .names / .subckt
//!   NoModel ----------> InModel ------------------------> InModel + open block
//!      ^                   |  ^                                   |
//!      |       .end        |  +------ any other directive --------+
//!      +-------------------+
//! ```
//!
//! A `.names` or `.subckt` block stays open until the next recognized
//! directive or the end of input closes it, at which point the listener gets
//! its `end_names`/`end_subckt`.

use crate::callback::Callback;

/// Block accumulating lines after a `.names` or `.subckt` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenBlock {
    /// Cover rows follow; `arity` is the number of input connections
    Names { arity: usize },
    /// Instance ports were emitted; `end_subckt` is pending
    Subckt,
}

/// The currently open model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelContext {
    /// Model name from the `.model` line
    pub name: String,
    /// Line of the `.model` directive
    pub line: usize,
    /// Text of the `.model` directive, for end-of-input diagnostics
    pub text: String,
    /// Open `.names` or `.subckt` block, if any
    pub block: Option<OpenBlock>,
    /// The last directive was a cell (`.names`, `.latch`, `.subckt`) or one
    /// of its `.cname`/`.attr`/`.param` lines
    pub after_cell: bool,
}

/// Coarse parser state, mostly for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between models
    NoModel,
    /// Inside a model with no open block
    InModel,
    /// Accepting cover rows for a `.names` block
    InModelNames,
    /// After a `.subckt` line, `end_subckt` pending
    InModelSubckt,
}

/// Tracks the single live [`ModelContext`].
#[derive(Debug, Default)]
pub struct ModelState {
    model: Option<ModelContext>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        match &self.model {
            None => State::NoModel,
            Some(ctx) => match ctx.block {
                None => State::InModel,
                Some(OpenBlock::Names { .. }) => State::InModelNames,
                Some(OpenBlock::Subckt) => State::InModelSubckt,
            },
        }
    }

    pub fn model(&self) -> Option<&ModelContext> {
        self.model.as_ref()
    }

    /// Open a new model. The caller has already checked that none is open.
    pub fn open_model(&mut self, name: &str, line: usize, text: &str) {
        debug_assert!(self.model.is_none());
        self.model = Some(ModelContext {
            name: name.to_string(),
            line,
            text: text.to_string(),
            block: None,
            after_cell: false,
        });
    }

    /// Close the current model, returning it.
    pub fn close_model(&mut self) -> Option<ModelContext> {
        self.model.take()
    }

    /// Arity of the open `.names` block, if cover rows are currently accepted.
    pub fn names_arity(&self) -> Option<usize> {
        match self.model.as_ref()?.block {
            Some(OpenBlock::Names { arity }) => Some(arity),
            _ => None,
        }
    }

    /// Open a block in the current model. Its header line is a cell.
    pub fn open_block(&mut self, block: OpenBlock) {
        if let Some(ctx) = self.model.as_mut() {
            debug_assert!(ctx.block.is_none());
            ctx.block = Some(block);
            ctx.after_cell = true;
        }
    }

    /// Record that the last directive was a cell (used by `.latch`).
    pub fn mark_cell(&mut self) {
        if let Some(ctx) = self.model.as_mut() {
            ctx.after_cell = true;
        }
    }

    /// Forget the last cell; cell attributes are rejected until the next one.
    pub fn end_cell(&mut self) {
        if let Some(ctx) = self.model.as_mut() {
            ctx.after_cell = false;
        }
    }

    /// Close any open block, notifying the listener exactly once.
    pub fn close_block(&mut self, callback: &mut dyn Callback) {
        let Some(ctx) = self.model.as_mut() else {
            return;
        };
        match ctx.block.take() {
            Some(OpenBlock::Names { .. }) => callback.end_names(),
            Some(OpenBlock::Subckt) => callback.end_subckt(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventLog};

    #[test]
    fn test_state_transitions() {
        let mut state = ModelState::new();
        let mut log = EventLog::new();
        assert_eq!(state.state(), State::NoModel);

        state.open_model("top", 1, ".model top");
        assert_eq!(state.state(), State::InModel);

        state.open_block(OpenBlock::Names { arity: 2 });
        assert_eq!(state.state(), State::InModelNames);
        assert_eq!(state.names_arity(), Some(2));

        state.close_block(&mut log);
        assert_eq!(state.state(), State::InModel);
        assert_eq!(state.names_arity(), None);

        state.open_block(OpenBlock::Subckt);
        assert_eq!(state.state(), State::InModelSubckt);
        state.close_block(&mut log);

        assert!(state.model().unwrap().after_cell);
        state.end_cell();
        assert!(!state.model().unwrap().after_cell);

        let ctx = state.close_model().unwrap();
        assert_eq!(ctx.name, "top");
        assert_eq!(state.state(), State::NoModel);

        assert_eq!(log.events(), &[Event::EndNames, Event::EndSubckt]);
    }

    #[test]
    fn test_close_block_is_idempotent() {
        let mut state = ModelState::new();
        let mut log = EventLog::new();
        state.open_model("m", 1, ".model m");
        state.open_block(OpenBlock::Names { arity: 0 });
        state.close_block(&mut log);
        state.close_block(&mut log);
        assert_eq!(log.events(), &[Event::EndNames]);
    }
}
