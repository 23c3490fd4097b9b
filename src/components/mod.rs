//! Circuit element models.
//!
//! This module provides models for all supported two-terminal elements:
//! - Linear: Resistor, Capacitor, Inductor
//! - Composite: Series, Parallel, Divider
//!
//! Each element reports a DC resistance and a complex impedance at a given
//! frequency. Composites evaluate their children recursively; nothing is
//! cached, so every element tree can be shared and evaluated concurrently.

mod composite;
mod linear;

pub use composite::{Divider, Parallel, Series};
pub use linear::{Capacitor, Inductor, Resistor};
pub(crate) use linear::Quantity;

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::error::{DipoleError, Result};

/// Check that an element name is not blank and take ownership of it.
pub(crate) fn validate_name(name: impl Into<String>) -> Result<String> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(DipoleError::invalid_argument(
            "element name must not be empty or whitespace",
        ));
    }
    Ok(name)
}

/// A two-terminal circuit element.
#[derive(Debug, Clone)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    Series(Series),
    Parallel(Parallel),
    Divider(Divider),
}

impl Element {
    /// Create a resistor element.
    pub fn resistor(name: impl Into<String>, ohms: f64) -> Result<Self> {
        Resistor::new(name, ohms).map(Element::Resistor)
    }

    /// Create a capacitor element.
    pub fn capacitor(name: impl Into<String>, farads: f64) -> Result<Self> {
        Capacitor::new(name, farads).map(Element::Capacitor)
    }

    /// Create an inductor element.
    pub fn inductor(name: impl Into<String>, henrys: f64) -> Result<Self> {
        Inductor::new(name, henrys).map(Element::Inductor)
    }

    /// Create a series composite.
    pub fn series<I>(name: impl Into<String>, children: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Element>>,
    {
        Series::new(name, children).map(Element::Series)
    }

    /// Create a parallel composite.
    pub fn parallel<I>(name: impl Into<String>, children: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Element>>,
    {
        Parallel::new(name, children).map(Element::Parallel)
    }

    /// Create a voltage divider.
    pub fn divider(
        name: impl Into<String>,
        upper: impl Into<Arc<Element>>,
        lower: impl Into<Arc<Element>>,
    ) -> Result<Self> {
        Divider::new(name, upper, lower).map(Element::Divider)
    }

    /// Get the element name.
    pub fn name(&self) -> &str {
        match self {
            Element::Resistor(r) => r.name(),
            Element::Capacitor(c) => c.name(),
            Element::Inductor(l) => l.name(),
            Element::Series(s) => s.name(),
            Element::Parallel(p) => p.name(),
            Element::Divider(d) => d.name(),
        }
    }

    /// DC-equivalent resistance in ohms.
    pub fn resistance(&self) -> f64 {
        match self {
            Element::Resistor(r) => r.resistance(),
            Element::Capacitor(c) => c.resistance(),
            Element::Inductor(l) => l.resistance(),
            Element::Series(s) => s.resistance(),
            Element::Parallel(p) => p.resistance(),
            Element::Divider(d) => d.resistance(),
        }
    }

    /// Complex impedance at `frequency_hz`.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        match self {
            Element::Resistor(r) => r.impedance(frequency_hz),
            Element::Capacitor(c) => c.impedance(frequency_hz),
            Element::Inductor(l) => l.impedance(frequency_hz),
            Element::Series(s) => s.impedance(frequency_hz),
            Element::Parallel(p) => p.impedance(frequency_hz),
            Element::Divider(d) => d.impedance(frequency_hz),
        }
    }

    /// Voltage across the element when `current_a` flows through it at DC.
    pub fn dc_voltage(&self, current_a: f64) -> f64 {
        self.resistance() * current_a
    }

    /// Direct children of a composite; empty for leaves.
    pub fn children(&self) -> Vec<&Arc<Element>> {
        match self {
            Element::Series(s) => s.children().iter().collect(),
            Element::Parallel(p) => p.children().iter().collect(),
            Element::Divider(d) => vec![d.upper(), d.lower()],
            _ => Vec::new(),
        }
    }

    /// The divider inside this element, if it is one.
    pub fn as_divider(&self) -> Option<&Divider> {
        match self {
            Element::Divider(d) => Some(d),
            _ => None,
        }
    }

    /// Check if this element is a leaf component.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Element::Resistor(_) | Element::Capacitor(_) | Element::Inductor(_)
        )
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Resistor(r) => fmt::Display::fmt(r, f),
            Element::Capacitor(c) => fmt::Display::fmt(c, f),
            Element::Inductor(l) => fmt::Display::fmt(l, f),
            Element::Series(s) => fmt::Display::fmt(s, f),
            Element::Parallel(p) => fmt::Display::fmt(p, f),
            Element::Divider(d) => fmt::Display::fmt(d, f),
        }
    }
}

impl From<Resistor> for Element {
    fn from(r: Resistor) -> Self {
        Element::Resistor(r)
    }
}

impl From<Capacitor> for Element {
    fn from(c: Capacitor) -> Self {
        Element::Capacitor(c)
    }
}

impl From<Inductor> for Element {
    fn from(l: Inductor) -> Self {
        Element::Inductor(l)
    }
}

impl From<Series> for Element {
    fn from(s: Series) -> Self {
        Element::Series(s)
    }
}

impl From<Parallel> for Element {
    fn from(p: Parallel) -> Self {
        Element::Parallel(p)
    }
}

impl From<Divider> for Element {
    fn from(d: Divider) -> Self {
        Element::Divider(d)
    }
}

/// Synthesize a resistive divider delivering `ux` volts out of `uin`.
///
/// Solves `ux = uin · R2 / (R1 + R2)` for `R2` and returns
/// `Ser(VoltageDivider, Res(R1, r1), Res(R2, r2))`.
pub fn voltage_divider(uin: f64, ux: f64, r1: f64) -> Result<Element> {
    let r2 = r1 * ux / (uin - ux);
    Element::series(
        "VoltageDivider",
        [Element::resistor("R1", r1)?, Element::resistor("R2", r2)?],
    )
}
