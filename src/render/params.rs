//! Parameter rendering strategies.
//!
//! A renderer delegates bound-parameter occurrences to one of these
//! formatter objects, chosen once at adapter construction. Bind mode leaves
//! `?` markers for the driver to fill; literal mode substitutes the quoted
//! value into the statement text.

use crate::models::QueryParam;
use crate::render::quote;

/// Which parameter strategy an adapter was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// Leave `?` placeholders for driver-side binding.
    Bind,
    /// Substitute quoted literal values into the SQL text.
    Literal,
}

impl ParamMode {
    /// Build the formatter object for this mode.
    pub fn formatter(self) -> Box<dyn ParamFormatter> {
        match self {
            Self::Bind => Box::new(BindFormatter),
            Self::Literal => Box::new(LiteralFormatter),
        }
    }
}

/// Renders one bound-parameter occurrence into SQL text.
pub trait ParamFormatter: std::fmt::Debug {
    fn format(&self, value: &QueryParam) -> String;
    fn mode(&self) -> ParamMode;
}

/// Emits a `?` placeholder; the value stays with the driver call.
#[derive(Debug)]
pub struct BindFormatter;

impl ParamFormatter for BindFormatter {
    fn format(&self, _value: &QueryParam) -> String {
        "?".to_string()
    }

    fn mode(&self) -> ParamMode {
        ParamMode::Bind
    }
}

/// Substitutes the quoted literal value in place of the parameter.
#[derive(Debug)]
pub struct LiteralFormatter;

impl ParamFormatter for LiteralFormatter {
    fn format(&self, value: &QueryParam) -> String {
        quote::quote_param(value)
    }

    fn mode(&self) -> ParamMode {
        ParamMode::Literal
    }
}
