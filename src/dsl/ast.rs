//! Abstract Syntax Tree types for the circuit notation.

use crate::filters::{RcKind, RlcKind};

/// A parsed top-level expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Element(ElementExpr),
    Filter(FilterExpr),
}

/// An element expression such as `Ser(S1, Res(R1, 1k), Cap(C1, 10n))`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementExpr {
    /// Resistor, capacitor or inductor
    Leaf {
        kind: LeafKind,
        name: String,
        value: f64,
        line: usize,
    },
    /// Series, parallel or divider over child elements
    Composite {
        kind: CompositeKind,
        name: String,
        children: Vec<ElementExpr>,
        line: usize,
    },
}

impl ElementExpr {
    /// Source line number for error reporting.
    pub fn line(&self) -> usize {
        match self {
            ElementExpr::Leaf { line, .. } | ElementExpr::Composite { line, .. } => *line,
        }
    }

    /// Check if this expression is a divider (and can therefore act as a filter).
    pub fn is_divider(&self) -> bool {
        matches!(
            self,
            ElementExpr::Composite {
                kind: CompositeKind::Divider,
                ..
            }
        )
    }
}

/// A filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// `RC(R, C, kind)`
    Rc { ohms: f64, farads: f64, kind: RcKind },
    /// `RLC(R, C, L, kind)`
    Rlc {
        ohms: f64,
        farads: f64,
        henrys: f64,
        kind: RlcKind,
    },
    /// A `Div(...)` element used as a filter
    Divider(ElementExpr),
    /// `Cascade(...)`: product of the stages
    Cascade(Vec<FilterExpr>),
    /// `Sum(...)`: sum of the branches
    Sum(Vec<FilterExpr>),
}

/// Leaf element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Resistor,
    Capacitor,
    Inductor,
}

impl LeafKind {
    /// Unit symbols accepted after the value.
    pub fn accepts_unit(&self, unit: &str) -> bool {
        match self {
            Self::Resistor => matches!(unit, "Ω" | "Ω" | "ohm" | "ohms" | "Ohm"),
            Self::Capacitor => unit == "F",
            Self::Inductor => unit == "H",
        }
    }
}

/// Composite element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Series,
    Parallel,
    Divider,
}

/// Every constructor keyword of the notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Leaf(LeafKind),
    Composite(CompositeKind),
    Rc,
    Rlc,
    Cascade,
    Sum,
}

impl Keyword {
    /// Parse a keyword, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let keyword = match name.to_ascii_lowercase().as_str() {
            "res" | "resistor" => Self::Leaf(LeafKind::Resistor),
            "cap" | "capacitor" => Self::Leaf(LeafKind::Capacitor),
            "ind" | "inductor" => Self::Leaf(LeafKind::Inductor),
            "ser" | "series" => Self::Composite(CompositeKind::Series),
            "par" | "parallel" => Self::Composite(CompositeKind::Parallel),
            "div" | "divider" => Self::Composite(CompositeKind::Divider),
            "rc" | "rcfilter" => Self::Rc,
            "rlc" | "rlcfilter" => Self::Rlc,
            "cascade" | "seriesfilter" => Self::Cascade,
            "sum" | "parallelfilter" => Self::Sum,
            _ => return None,
        };
        Some(keyword)
    }
}
