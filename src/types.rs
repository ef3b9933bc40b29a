//! Core value types shared by the parser and its listeners.

use std::fmt;

/// One symbol of a cover row, or a latch's initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicValue {
    /// Logic zero
    False,
    /// Logic one
    True,
    /// Don't care
    DontCare,
    /// Unknown (e.g. latch initial state)
    Unknown,
}

impl LogicValue {
    /// Map a cover-row symbol (`0`, `1`, `-`).
    pub fn from_cover_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::False),
            '1' => Some(Self::True),
            '-' => Some(Self::DontCare),
            _ => None,
        }
    }

    /// Map a latch initial value (`0`, `1`, `2`, `3`).
    pub fn from_latch_init(text: &str) -> Option<Self> {
        match text {
            "0" => Some(Self::False),
            "1" => Some(Self::True),
            "2" => Some(Self::DontCare),
            "3" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Symbol used for this value in a cover row.
    ///
    /// `Unknown` has no cover-row spelling and is written as `?`.
    pub fn cover_symbol(&self) -> char {
        match self {
            Self::False => '0',
            Self::True => '1',
            Self::DontCare => '-',
            Self::Unknown => '?',
        }
    }

    /// Digit used for this value as a latch initial value.
    pub fn latch_init_digit(&self) -> char {
        match self {
            Self::False => '0',
            Self::True => '1',
            Self::DontCare => '2',
            Self::Unknown => '3',
        }
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cover_symbol())
    }
}

/// Clocking behaviour of a `.latch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatchType {
    /// `fe`
    FallingEdge,
    /// `re`
    RisingEdge,
    /// `ah`
    ActiveHigh,
    /// `al`
    ActiveLow,
    /// `as`
    Asynchronous,
    /// No type given on the `.latch` line
    Unspecified,
}

impl LatchType {
    /// Parse a latch type keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "fe" => Some(Self::FallingEdge),
            "re" => Some(Self::RisingEdge),
            "ah" => Some(Self::ActiveHigh),
            "al" => Some(Self::ActiveLow),
            "as" => Some(Self::Asynchronous),
            _ => None,
        }
    }

    /// The BLIF keyword, or `None` for [`LatchType::Unspecified`].
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::FallingEdge => Some("fe"),
            Self::RisingEdge => Some("re"),
            Self::ActiveHigh => Some("ah"),
            Self::ActiveLow => Some("al"),
            Self::Asynchronous => Some("as"),
            Self::Unspecified => None,
        }
    }
}

impl fmt::Display for LatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("unspecified"))
    }
}

/// Directive keywords recognized at the start of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Model,
    Inputs,
    Outputs,
    Names,
    Latch,
    Subckt,
    Blackbox,
    End,
    /// Extended BLIF: net-to-net connection
    Conn,
    /// Extended BLIF: instance name of the preceding cell
    Cname,
    /// Extended BLIF: attribute of the preceding cell
    Attr,
    /// Extended BLIF: parameter of the preceding cell
    Param,
}

impl Directive {
    /// Parse a directive from its keyword, including the leading `.`.
    ///
    /// Keywords are case sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            ".model" => Some(Self::Model),
            ".inputs" => Some(Self::Inputs),
            ".outputs" => Some(Self::Outputs),
            ".names" => Some(Self::Names),
            ".latch" => Some(Self::Latch),
            ".subckt" => Some(Self::Subckt),
            ".blackbox" => Some(Self::Blackbox),
            ".end" => Some(Self::End),
            ".conn" => Some(Self::Conn),
            ".cname" => Some(Self::Cname),
            ".attr" => Some(Self::Attr),
            ".param" => Some(Self::Param),
            _ => None,
        }
    }

    /// The keyword as written in BLIF.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Model => ".model",
            Self::Inputs => ".inputs",
            Self::Outputs => ".outputs",
            Self::Names => ".names",
            Self::Latch => ".latch",
            Self::Subckt => ".subckt",
            Self::Blackbox => ".blackbox",
            Self::End => ".end",
            Self::Conn => ".conn",
            Self::Cname => ".cname",
            Self::Attr => ".attr",
            Self::Param => ".param",
        }
    }

    /// Whether this directive belongs to extended BLIF.
    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Conn | Self::Cname | Self::Attr | Self::Param)
    }

    /// Whether this directive annotates the cell on the line before it.
    pub fn is_cell_attribute(&self) -> bool {
        matches!(self, Self::Cname | Self::Attr | Self::Param)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_symbols() {
        assert_eq!(LogicValue::from_cover_symbol('0'), Some(LogicValue::False));
        assert_eq!(LogicValue::from_cover_symbol('1'), Some(LogicValue::True));
        assert_eq!(LogicValue::from_cover_symbol('-'), Some(LogicValue::DontCare));
        assert_eq!(LogicValue::from_cover_symbol('2'), None);
        assert_eq!(LogicValue::from_cover_symbol('x'), None);
    }

    #[test]
    fn test_latch_init_values() {
        assert_eq!(LogicValue::from_latch_init("2"), Some(LogicValue::DontCare));
        assert_eq!(LogicValue::from_latch_init("3"), Some(LogicValue::Unknown));
        assert_eq!(LogicValue::from_latch_init("4"), None);
        assert_eq!(LogicValue::Unknown.latch_init_digit(), '3');
    }

    #[test]
    fn test_directive_keywords_are_case_sensitive() {
        assert_eq!(Directive::from_keyword(".names"), Some(Directive::Names));
        assert_eq!(Directive::from_keyword(".NAMES"), None);
        assert_eq!(Directive::from_keyword("names"), None);
        assert!(Directive::Param.is_extension());
        assert!(!Directive::Latch.is_extension());
        assert!(Directive::Cname.is_cell_attribute());
        assert!(!Directive::Conn.is_cell_attribute());
    }
}
