//! Linear passive components: Resistor, Capacitor, Inductor.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;

use super::validate_name;
use crate::error::Result;

/// Component value formatted for display.
///
/// Magnitudes below 1e-5 use exponent form (`3.3E-7`), everything else
/// the shortest positional form. Both read back through the notation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Quantity(pub f64);

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v != 0.0 && v.is_finite() && v.abs() < 1e-5 {
            write!(f, "{:E}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// A resistor component.
///
/// Its impedance is purely real and does not depend on frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    name: String,
    ohms: f64,
}

impl Resistor {
    /// Create a new resistor.
    ///
    /// Fails with [`DipoleError::InvalidArgument`](crate::DipoleError::InvalidArgument)
    /// if the name is empty or whitespace.
    pub fn new(name: impl Into<String>, ohms: f64) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            ohms,
        })
    }

    /// Built-in resistor of a formula filter, whose name is known to be valid.
    pub(crate) fn named(name: &'static str, ohms: f64) -> Self {
        Self {
            name: name.to_string(),
            ohms,
        }
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resistance value in ohms.
    pub fn ohms(&self) -> f64 {
        self.ohms
    }

    /// DC resistance, equal to the component value.
    pub fn resistance(&self) -> f64 {
        self.ohms
    }

    /// Impedance at `frequency_hz`: `R + 0j` at every frequency.
    pub fn impedance(&self, _frequency_hz: f64) -> Complex64 {
        Complex64::new(self.ohms, 0.0)
    }
}

impl fmt::Display for Resistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Res({}, {} Ω)", self.name, Quantity(self.ohms))
    }
}

/// A capacitor component.
///
/// At DC a capacitor is an open circuit, so its resistance is infinite.
/// In the frequency domain:
///   Z = -j / (2π f C)
///
/// At `f = 0` the imaginary part becomes `-inf`; this is not treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    name: String,
    farads: f64,
}

impl Capacitor {
    /// Create a new capacitor.
    pub fn new(name: impl Into<String>, farads: f64) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            farads,
        })
    }

    pub(crate) fn named(name: &'static str, farads: f64) -> Self {
        Self {
            name: name.to_string(),
            farads,
        }
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capacitance in farads.
    pub fn capacitance(&self) -> f64 {
        self.farads
    }

    /// DC resistance: always `+inf` (open circuit).
    pub fn resistance(&self) -> f64 {
        f64::INFINITY
    }

    /// Impedance at `frequency_hz`.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        Complex64::new(0.0, -1.0 / (2.0 * PI * frequency_hz * self.farads))
    }
}

impl fmt::Display for Capacitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cap({}, {} F)", self.name, Quantity(self.farads))
    }
}

/// An inductor component.
///
/// At DC an inductor behaves like a wire (zero resistance).
/// In the frequency domain:
///   Z = j 2π f L
#[derive(Debug, Clone, PartialEq)]
pub struct Inductor {
    name: String,
    henrys: f64,
}

impl Inductor {
    /// Create a new inductor.
    pub fn new(name: impl Into<String>, henrys: f64) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            henrys,
        })
    }

    pub(crate) fn named(name: &'static str, henrys: f64) -> Self {
        Self {
            name: name.to_string(),
            henrys,
        }
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inductance in henrys.
    pub fn inductance(&self) -> f64 {
        self.henrys
    }

    /// DC resistance: always zero (short circuit).
    pub fn resistance(&self) -> f64 {
        0.0
    }

    /// Impedance at `frequency_hz`.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        Complex64::new(0.0, 2.0 * PI * frequency_hz * self.henrys)
    }
}

impl fmt::Display for Inductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ind({}, {} H)", self.name, Quantity(self.henrys))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::DipoleError;

    #[test]
    fn test_resistor_impedance_is_real() {
        let r = Resistor::new("R1", 1000.0).unwrap();
        for f in [0.0, 1.0, 1e3, 1e9] {
            let z = r.impedance(f);
            assert_eq!(z, Complex64::new(1000.0, 0.0));
        }
        assert_eq!(r.resistance(), 1000.0);
    }

    #[test]
    fn test_capacitor_impedance() {
        let c = Capacitor::new("C1", 100e-9).unwrap();
        let z = c.impedance(1000.0);
        assert_eq!(z.re, 0.0);
        // 1 / (2π · 1 kHz · 100 nF) ≈ 1591.55 Ω
        assert_relative_eq!(z.im, -1591.5494309189535, max_relative = 1e-12);
        assert!(c.resistance().is_infinite());
    }

    #[test]
    fn test_capacitor_at_dc_is_infinite() {
        let c = Capacitor::new("C1", 1e-6).unwrap();
        let z = c.impedance(0.0);
        assert!(z.im.is_infinite() && z.im < 0.0);
    }

    #[test]
    fn test_inductor_impedance() {
        let l = Inductor::new("L1", 10e-3).unwrap();
        let z = l.impedance(1000.0);
        assert_eq!(z.re, 0.0);
        assert_relative_eq!(z.im, 2.0 * PI * 10.0, max_relative = 1e-12);
        assert_eq!(l.resistance(), 0.0);
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(matches!(
            Resistor::new("", 1.0),
            Err(DipoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Capacitor::new("   ", 1.0),
            Err(DipoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Inductor::new("\t\n", 1.0),
            Err(DipoleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Resistor::new("R1", 1000.0).unwrap().to_string(), "Res(R1, 1000 Ω)");
        assert_eq!(Capacitor::new("C1", 0.5).unwrap().to_string(), "Cap(C1, 0.5 F)");
        assert_eq!(Inductor::new("L1", 2.0).unwrap().to_string(), "Ind(L1, 2 H)");
    }

    #[test]
    fn test_display_small_values_in_exponent_form() {
        assert_eq!(Capacitor::new("C1", 330e-9).unwrap().to_string(), "Cap(C1, 3.3E-7 F)");
        assert_eq!(Capacitor::new("C2", 1e-12).unwrap().to_string(), "Cap(C2, 1E-12 F)");
        assert_eq!(Inductor::new("L1", 1e-5).unwrap().to_string(), "Ind(L1, 0.00001 H)");
        assert_eq!(Resistor::new("R0", 0.0).unwrap().to_string(), "Res(R0, 0 Ω)");
    }
}
