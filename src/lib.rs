//! # Dipole Core
//!
//! Frequency-domain analysis of passive two-terminal circuits.
//!
//! This library provides:
//! - Linear elements (R, C, L) and their series, parallel and divider compositions
//! - Complex impedance and DC resistance of arbitrarily nested element trees
//! - Passive filters (RC, RLC) built on voltage dividers, plus cascades and sums
//! - Logarithmic frequency sweeps producing Bode diagram data
//! - A text notation matching the elements' display strings
//!
//! ## Architecture
//!
//! - [`components`] - Element tree (resistors, capacitors, inductors, composites)
//! - [`filters`] - The [`Filter`] trait and its implementations
//! - [`sweep`] - Sampling a filter over frequency
//! - [`output`] - CSV writers for sampled responses
//! - [`dsl`] - Parser for the circuit notation
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use dipole_core::{Element, Filter, RcFilter, RcKind};
//!
//! let s = Element::series(
//!     "S1",
//!     [Element::resistor("R1", 1000.0)?, Element::resistor("R2", 2000.0)?],
//! )?;
//! assert_eq!(s.resistance(), 3000.0);
//! assert_eq!(s.to_string(), "Ser(S1, Res(R1, 1000 Ω), Res(R2, 2000 Ω))");
//!
//! let rc = RcFilter::new(1000.0, 100e-9, RcKind::Lowpass);
//! let f0 = rc.characteristic_frequencies()[0];
//! assert!((f0 - 1591.5494309189535).abs() < 1e-9);
//! # Ok::<(), dipole_core::DipoleError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! dipole bode "RC(1k, 100n, lowpass)" --markers -o rc.csv
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmFilter } from 'dipole_core';
//!
//! const filter = new WasmFilter("RLC(100, 1u, 10m, bandpass)");
//! const db = filter.magnitude_db(1591.5);
//! ```
//!
//! ## Numeric conventions
//!
//! Evaluation never fails. Open circuits and zero frequencies produce
//! IEEE-754 infinities, which propagate through the arithmetic; a parallel
//! branch that is open contributes no admittance and one that is shorted
//! shorts the whole combination. Only construction validates its inputs.

pub mod components;
pub mod dsl;
pub mod error;
pub mod filters;
pub mod output;
pub mod sweep;

// Re-export main types for convenience
pub use components::{
    voltage_divider, Capacitor, Divider, Element, Inductor, Parallel, Resistor, Series,
};
pub use error::{DipoleError, Result};
pub use filters::{Filter, ParallelFilter, RcFilter, RcKind, RlcFilter, RlcKind, SeriesFilter};
pub use sweep::{BodeDiagram, SweepConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmFilter;

/// First frequency of the default sweep (Hz)
pub const DEFAULT_START_HZ: f64 = 10.0;

/// Upper bound of the default sweep (Hz), not itself sampled
pub const DEFAULT_STOP_HZ: f64 = 1e5;

/// Number of samples in the default sweep
pub const DEFAULT_POINT_COUNT: usize = 400;
