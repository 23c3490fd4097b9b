//! Second-order RLC filters.
//!
//! Each kind is a divider over the same three components:
//!
//! | Kind     | Upper arm      | Lower arm (output) |
//! |----------|----------------|--------------------|
//! | Lowpass  | Series(R, L)   | C                  |
//! | Highpass | Series(R, C)   | L                  |
//! | Bandpass | Series(L, C)   | R                  |
//! | Bandcut  | R              | Series(L, C)       |

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use num_complex::Complex64;

use super::Filter;
use crate::components::{Capacitor, Divider, Element, Inductor, Quantity, Resistor, Series};
use crate::error::DipoleError;

/// RLC filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RlcKind {
    Lowpass,
    Highpass,
    Bandpass,
    Bandcut,
}

impl FromStr for RlcKind {
    type Err = DipoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowpass" | "lp" => Ok(Self::Lowpass),
            "highpass" | "hp" => Ok(Self::Highpass),
            "bandpass" | "bp" => Ok(Self::Bandpass),
            "bandcut" | "bandstop" | "notch" => Ok(Self::Bandcut),
            _ => Err(DipoleError::invalid_argument(format!(
                "unknown RLC filter kind '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for RlcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lowpass => "Lowpass",
            Self::Highpass => "Highpass",
            Self::Bandpass => "Bandpass",
            Self::Bandcut => "Bandcut",
        };
        write!(f, "{}", name)
    }
}

/// A resistor, a capacitor and an inductor wired as a voltage divider.
#[derive(Debug, Clone)]
pub struct RlcFilter {
    resistor: Resistor,
    capacitor: Capacitor,
    inductor: Inductor,
    kind: RlcKind,
    divider: Divider,
}

impl RlcFilter {
    /// Create a filter from component values.
    pub fn new(ohms: f64, farads: f64, henrys: f64, kind: RlcKind) -> Self {
        let resistor = Resistor::named("R", ohms);
        let capacitor = Capacitor::named("C", farads);
        let inductor = Inductor::named("L", henrys);

        let r = Arc::new(Element::Resistor(resistor.clone()));
        let c = Arc::new(Element::Capacitor(capacitor.clone()));
        let l = Arc::new(Element::Inductor(inductor.clone()));
        let series = |a: &Arc<Element>, b: &Arc<Element>| {
            Element::Series(Series::named("Series", vec![a.clone(), b.clone()]))
        };

        let (upper, lower) = match kind {
            RlcKind::Lowpass => (series(&r, &l), (*c).clone()),
            RlcKind::Highpass => (series(&r, &c), (*l).clone()),
            RlcKind::Bandpass => (series(&l, &c), (*r).clone()),
            RlcKind::Bandcut => ((*r).clone(), series(&l, &c)),
        };

        Self {
            resistor,
            capacitor,
            inductor,
            kind,
            divider: Divider::named("RLC Divider", upper, lower),
        }
    }

    /// Resonant frequency `f0 = 1 / (2π √(L C))`.
    pub fn resonant_frequency(&self) -> f64 {
        1.0 / (2.0 * PI * (self.inductor.inductance() * self.capacitor.capacitance()).sqrt())
    }

    /// Half-width of the band around `f0`; zero for lowpass and highpass.
    pub fn half_bandwidth(&self) -> f64 {
        match self.kind {
            RlcKind::Lowpass | RlcKind::Highpass => 0.0,
            RlcKind::Bandpass => self.resistor.ohms() / (2.0 * PI * self.inductor.inductance()),
            RlcKind::Bandcut => {
                1.0 / (2.0 * PI * (self.resistor.ohms() * self.capacitor.capacitance()))
            }
        }
    }

    /// Resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistor.ohms()
    }

    /// Capacitance in farads.
    pub fn capacitance(&self) -> f64 {
        self.capacitor.capacitance()
    }

    /// Inductance in henrys.
    pub fn inductance(&self) -> f64 {
        self.inductor.inductance()
    }

    /// Filter kind.
    pub fn kind(&self) -> RlcKind {
        self.kind
    }

    /// The underlying divider.
    pub fn divider(&self) -> &Divider {
        &self.divider
    }
}

impl Filter for RlcFilter {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        self.divider.transfer_function(frequency_hz)
    }

    /// `[f0]`, or `[f0, f0 + Δ, f0 - Δ]` for band filters.
    fn characteristic_frequencies(&self) -> Vec<f64> {
        let f0 = self.resonant_frequency();
        match self.kind {
            RlcKind::Lowpass | RlcKind::Highpass => vec![f0],
            RlcKind::Bandpass | RlcKind::Bandcut => {
                let delta = self.half_bandwidth();
                vec![f0, f0 + delta, f0 - delta]
            }
        }
    }
}

impl fmt::Display for RlcFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RLCFilter(R={} Ω, L={} H, C={} F, kind={})",
            Quantity(self.resistor.ohms()),
            Quantity(self.inductor.inductance()),
            Quantity(self.capacitor.capacitance()),
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const R: f64 = 100.0;
    const C: f64 = 1e-6;
    const L: f64 = 10e-3;

    fn f0() -> f64 {
        1.0 / (2.0 * PI * (L * C).sqrt())
    }

    #[test]
    fn test_resonant_frequency() {
        let filter = RlcFilter::new(R, C, L, RlcKind::Lowpass);
        assert_relative_eq!(filter.resonant_frequency(), f0(), max_relative = 1e-12);
        assert_eq!(filter.characteristic_frequencies(), vec![filter.resonant_frequency()]);
    }

    #[test]
    fn test_bandpass_frequencies() {
        let filter = RlcFilter::new(R, C, L, RlcKind::Bandpass);
        let delta = R / (2.0 * PI * L);
        let freqs = filter.characteristic_frequencies();
        assert_eq!(freqs.len(), 3);
        assert_relative_eq!(freqs[0], f0(), max_relative = 1e-12);
        assert_relative_eq!(freqs[1], f0() + delta, max_relative = 1e-12);
        assert_relative_eq!(freqs[2], f0() - delta, max_relative = 1e-12);
    }

    #[test]
    fn test_bandcut_frequencies() {
        let filter = RlcFilter::new(R, C, L, RlcKind::Bandcut);
        let delta = 1.0 / (2.0 * PI * R * C);
        let freqs = filter.characteristic_frequencies();
        assert_relative_eq!(freqs[1] - freqs[0], delta, max_relative = 1e-9);
        assert_relative_eq!(freqs[0] - freqs[2], delta, max_relative = 1e-9);
    }

    #[test]
    fn test_bandpass_is_unity_at_resonance() {
        let filter = RlcFilter::new(R, C, L, RlcKind::Bandpass);
        let h = filter.transfer_function(f0());
        assert_relative_eq!(h.norm(), 1.0, epsilon = 1e-9);
        assert!(filter.transfer_function(10.0).norm() < 0.1);
        assert!(filter.transfer_function(1e6).norm() < 0.1);
    }

    #[test]
    fn test_bandcut_rejects_resonance() {
        let filter = RlcFilter::new(R, C, L, RlcKind::Bandcut);
        assert!(filter.transfer_function(f0()).norm() < 1e-6);
        assert_relative_eq!(filter.transfer_function(1.0).norm(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_lowpass_and_highpass_extremes() {
        let lp = RlcFilter::new(R, C, L, RlcKind::Lowpass);
        let hp = RlcFilter::new(R, C, L, RlcKind::Highpass);
        assert_relative_eq!(lp.transfer_function(1.0).norm(), 1.0, epsilon = 1e-3);
        assert!(lp.transfer_function(1e6).norm() < 1e-3);
        assert!(hp.transfer_function(1.0).norm() < 1e-3);
        assert_relative_eq!(hp.transfer_function(1e6).norm(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_topology_per_kind() {
        let filter = RlcFilter::new(1.0, 2.0, 3.0, RlcKind::Bandcut);
        assert_eq!(
            filter.divider().to_string(),
            "Div(RLC Divider, Res(R, 1 Ω), Ser(Series, Ind(L, 3 H), Cap(C, 2 F)))"
        );
        let filter = RlcFilter::new(1.0, 2.0, 3.0, RlcKind::Lowpass);
        assert_eq!(
            filter.divider().to_string(),
            "Div(RLC Divider, Ser(Series, Res(R, 1 Ω), Ind(L, 3 H)), Cap(C, 2 F))"
        );
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("bandcut".parse::<RlcKind>().unwrap(), RlcKind::Bandcut);
        assert!("allpass".parse::<RlcKind>().is_err());
    }
}
