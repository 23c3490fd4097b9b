//! Text notation for elements and filters.
//!
//! The notation is the same one the [`Display`](std::fmt::Display)
//! implementations produce, so any printed element tree can be read back.
//! Filters get their own constructors on top of the element ones.
//!
//! # Grammar Overview
//!
//! ```text
//! expr        = element | filter
//! element     = leaf | composite
//! leaf        = leaf_kw '(' name ',' quantity ')'
//! composite   = comp_kw '(' name { ',' element } ')'
//! filter      = "RC"  '(' quantity ',' quantity ',' kind ')'
//!             | "RLC" '(' quantity ',' quantity ',' quantity ',' kind ')'
//!             | "Cascade" '(' stage { ',' stage } ')'
//!             | "Sum" '(' stage { ',' stage } ')'
//! stage       = filter | divider
//!
//! leaf_kw     = "Res" | "Cap" | "Ind"
//! comp_kw     = "Ser" | "Par" | "Div"
//! name        = identifier | '"' { any_char } '"'
//! quantity    = number [unit_suffix] [unit]
//! unit        = "Ω" | "ohm" | "F" | "H"
//!
//! number      = ['-'|'+'] digit* ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! Keywords are case-insensitive and accept their long forms (`Resistor`,
//! `Series`, `SeriesFilter`, ...). `Div` takes exactly two elements, upper
//! arm first. Whitespace including newlines is insignificant, and `#` or
//! `;` start a comment running to the end of the line.
//!
//! # Example
//!
//! ```text
//! # 1 kΩ in series with a 100 nF capacitor
//! Ser(S1, Res(R1, 1k Ω), Cap(C1, 100n F))
//!
//! Cascade(RC(1k, 100n, lowpass), RLC(100, 1u, 10m, bandpass))
//! ```

mod ast;
mod build;
mod lexer;
mod parser;

pub use ast::*;
pub use build::{build_element, build_filter, build_filter_from_expr};
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use std::sync::Arc;

use crate::components::Element;
use crate::error::Result;
use crate::filters::Filter;

/// Parse notation into an expression.
pub fn parse(input: &str) -> Result<Expr> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse and build an element tree.
pub fn parse_element(input: &str) -> Result<Element> {
    let mut parser = Parser::new(Lexer::new(input))?;
    build_element(&parser.parse_element()?)
}

/// Parse and build a filter. A top-level `Div(...)` is accepted as a filter.
pub fn parse_filter(input: &str) -> Result<Arc<dyn Filter>> {
    let mut parser = Parser::new(Lexer::new(input))?;
    build_filter(&parser.parse_filter()?)
}

/// Read a notation file.
#[cfg(feature = "cli")]
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::error::DipoleError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
