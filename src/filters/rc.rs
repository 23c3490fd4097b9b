//! First-order RC filters.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;

use super::Filter;
use crate::components::{Capacitor, Divider, Element, Quantity, Resistor};
use crate::error::DipoleError;

/// RC filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RcKind {
    /// Output across the capacitor.
    Lowpass,
    /// Output across the resistor.
    Highpass,
}

impl FromStr for RcKind {
    type Err = DipoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowpass" | "lp" => Ok(Self::Lowpass),
            "highpass" | "hp" => Ok(Self::Highpass),
            _ => Err(DipoleError::invalid_argument(format!(
                "unknown RC filter kind '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for RcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowpass => write!(f, "Lowpass"),
            Self::Highpass => write!(f, "Highpass"),
        }
    }
}

/// A resistor and a capacitor wired as a voltage divider.
///
/// The cutoff frequency is
///   f0 = 1 / (2π R C)
#[derive(Debug, Clone)]
pub struct RcFilter {
    resistor: Resistor,
    capacitor: Capacitor,
    kind: RcKind,
    divider: Divider,
}

impl RcFilter {
    /// Create a filter from component values.
    pub fn new(ohms: f64, farads: f64, kind: RcKind) -> Self {
        let resistor = Resistor::named("R", ohms);
        let capacitor = Capacitor::named("C", farads);
        let (upper, lower) = match kind {
            RcKind::Lowpass => (
                Element::Resistor(resistor.clone()),
                Element::Capacitor(capacitor.clone()),
            ),
            RcKind::Highpass => (
                Element::Capacitor(capacitor.clone()),
                Element::Resistor(resistor.clone()),
            ),
        };
        Self {
            resistor,
            capacitor,
            kind,
            divider: Divider::named("RC Divider", upper, lower),
        }
    }

    /// Design a filter with the given cutoff using capacitance `farads`.
    ///
    /// Solves `R = 1 / (2π f C)`.
    pub fn for_cutoff_frequency(cutoff_hz: f64, farads: f64, kind: RcKind) -> Self {
        let ohms = 1.0 / (2.0 * PI * cutoff_hz * farads);
        Self::new(ohms, farads, kind)
    }

    /// Cutoff (-3 dB) frequency in hertz.
    pub fn cutoff_frequency(&self) -> f64 {
        1.0 / (2.0 * PI * self.resistor.ohms() * self.capacitor.capacitance())
    }

    /// Resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistor.ohms()
    }

    /// Capacitance in farads.
    pub fn capacitance(&self) -> f64 {
        self.capacitor.capacitance()
    }

    /// Filter kind.
    pub fn kind(&self) -> RcKind {
        self.kind
    }

    /// The underlying divider.
    pub fn divider(&self) -> &Divider {
        &self.divider
    }
}

impl Filter for RcFilter {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        self.divider.transfer_function(frequency_hz)
    }

    fn characteristic_frequencies(&self) -> Vec<f64> {
        vec![self.cutoff_frequency()]
    }
}

impl fmt::Display for RcFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RCFilter(R={} Ω, C={} F, f0={} Hz, kind={})",
            Quantity(self.resistor.ohms()),
            Quantity(self.capacitor.capacitance()),
            self.cutoff_frequency(),
            self.kind
        )
    }
}
