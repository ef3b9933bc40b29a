//! An owned record of parse events.
//!
//! [`EventLog`] is a [`Callback`] that stores every call it receives as an
//! [`Event`]. It is handy for tests and for tooling that wants to inspect
//! the event stream after the fact.

use std::fmt;

use crate::callback::Callback;
use crate::types::{LatchType, LogicValue};

/// One listener call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartModel(String),
    Inputs(Vec<String>),
    Outputs(Vec<String>),
    StartNames(Vec<String>),
    CoverRow(Vec<LogicValue>),
    EndNames,
    Latch {
        input: String,
        output: String,
        kind: LatchType,
        control: Option<String>,
        init: LogicValue,
    },
    StartSubckt(String),
    PortConnection {
        port: String,
        net: String,
    },
    EndSubckt,
    Blackbox,
    EndModel,
    Conn {
        src: String,
        dst: String,
    },
    Cname(String),
    Attr {
        name: String,
        value: String,
    },
    Param {
        name: String,
        value: String,
    },
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartModel(name) => write!(f, "start_model {}", name),
            Self::Inputs(nets) => write!(f, "inputs [{}]", nets.join(", ")),
            Self::Outputs(nets) => write!(f, "outputs [{}]", nets.join(", ")),
            Self::StartNames(nets) => write!(f, "start_names [{}]", nets.join(", ")),
            Self::CoverRow(row) => {
                let symbols: String = row.iter().map(|v| v.cover_symbol()).collect();
                write!(f, "single_output_cover_row {}", symbols)
            }
            Self::EndNames => write!(f, "end_names"),
            Self::Latch {
                input,
                output,
                kind,
                control,
                init,
            } => write!(
                f,
                "latch {} {} {} {} {}",
                input,
                output,
                kind,
                control.as_deref().unwrap_or("-"),
                init.latch_init_digit()
            ),
            Self::StartSubckt(model) => write!(f, "start_subckt {}", model),
            Self::PortConnection { port, net } => write!(f, "port_connection {}={}", port, net),
            Self::EndSubckt => write!(f, "end_subckt"),
            Self::Blackbox => write!(f, "blackbox"),
            Self::EndModel => write!(f, "end_model"),
            Self::Conn { src, dst } => write!(f, "conn {} {}", src, dst),
            Self::Cname(name) => write!(f, "cname {}", name),
            Self::Attr { name, value } => write!(f, "attr {} {}", name, value),
            Self::Param { name, value } => write!(f, "param {} {}", name, value),
        }
    }
}

/// A [`Callback`] that records every event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    source: Option<String>,
    finished: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they were received.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// File name announced by the parser, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether `finish_parse` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Callback for EventLog {
    fn filename(&mut self, name: &str) {
        self.source = Some(name.to_string());
    }

    fn start_model(&mut self, name: &str) {
        self.events.push(Event::StartModel(name.to_string()));
    }

    fn inputs(&mut self, inputs: &[&str]) {
        self.events.push(Event::Inputs(owned(inputs)));
    }

    fn outputs(&mut self, outputs: &[&str]) {
        self.events.push(Event::Outputs(owned(outputs)));
    }

    fn start_names(&mut self, connections: &[&str]) {
        self.events.push(Event::StartNames(owned(connections)));
    }

    fn single_output_cover_row(&mut self, row: &[LogicValue]) {
        self.events.push(Event::CoverRow(row.to_vec()));
    }

    fn end_names(&mut self) {
        self.events.push(Event::EndNames);
    }

    fn latch(
        &mut self,
        input: &str,
        output: &str,
        kind: LatchType,
        control: Option<&str>,
        init: LogicValue,
    ) {
        self.events.push(Event::Latch {
            input: input.to_string(),
            output: output.to_string(),
            kind,
            control: control.map(str::to_string),
            init,
        });
    }

    fn start_subckt(&mut self, model: &str) {
        self.events.push(Event::StartSubckt(model.to_string()));
    }

    fn port_connection(&mut self, port: &str, net: &str) {
        self.events.push(Event::PortConnection {
            port: port.to_string(),
            net: net.to_string(),
        });
    }

    fn end_subckt(&mut self) {
        self.events.push(Event::EndSubckt);
    }

    fn blackbox(&mut self) {
        self.events.push(Event::Blackbox);
    }

    fn end_model(&mut self) {
        self.events.push(Event::EndModel);
    }

    fn conn(&mut self, src: &str, dst: &str) {
        self.events.push(Event::Conn {
            src: src.to_string(),
            dst: dst.to_string(),
        });
    }

    fn cname(&mut self, name: &str) {
        self.events.push(Event::Cname(name.to_string()));
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.events.push(Event::Attr {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn param(&mut self, name: &str, value: &str) {
        self.events.push(Event::Param {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn finish_parse(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        assert_eq!(Event::StartModel("top".into()).to_string(), "start_model top");
        assert_eq!(
            Event::CoverRow(vec![LogicValue::True, LogicValue::DontCare, LogicValue::False])
                .to_string(),
            "single_output_cover_row 1-0"
        );
        let latch = Event::Latch {
            input: "d".into(),
            output: "q".into(),
            kind: LatchType::RisingEdge,
            control: Some("clk".into()),
            init: LogicValue::False,
        };
        assert_eq!(latch.to_string(), "latch d q re clk 0");
    }

    #[test]
    fn test_log_records_in_order() {
        let mut log = EventLog::new();
        log.start_model("m");
        log.inputs(&["a", "b"]);
        log.end_model();
        log.finish_parse();
        assert!(log.is_finished());
        assert_eq!(
            log.into_events(),
            vec![
                Event::StartModel("m".into()),
                Event::Inputs(vec!["a".into(), "b".into()]),
                Event::EndModel,
            ]
        );
    }
}
