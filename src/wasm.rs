//! WASM bindings for Dipole Core.
//!
//! This module provides JavaScript-friendly bindings for drawing Bode
//! diagrams in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmFilter } from 'dipole_core';
//!
//! await init();
//!
//! const filter = new WasmFilter("Cascade(RC(1k, 100n, lowpass), RC(1k, 100n, lowpass))");
//!
//! const freqs = filter.sweep_frequencies(10, 1e5, 400);
//! const mags = filter.sweep_magnitude_db(10, 1e5, 400);
//! const phases = filter.sweep_phase_deg(10, 1e5, 400);
//! ```

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::dsl;
use crate::filters::Filter;
use crate::sweep::{self, SweepConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible filter.
///
/// Wraps any filter the notation can describe.
#[wasm_bindgen]
pub struct WasmFilter {
    filter: Arc<dyn Filter>,
}

#[wasm_bindgen]
impl WasmFilter {
    /// Create a filter from its notation.
    ///
    /// # Example
    /// ```javascript
    /// const filter = new WasmFilter("RLC(100, 1u, 10m, bandpass)");
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(notation: &str) -> Result<WasmFilter, JsValue> {
        let filter = dsl::parse_filter(notation).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmFilter { filter })
    }

    /// Magnitude of the transfer function at `frequency_hz`, in dB.
    #[wasm_bindgen]
    pub fn magnitude_db(&self, frequency_hz: f64) -> f64 {
        sweep::magnitude_db(self.filter.transfer_function(frequency_hz))
    }

    /// Phase of the transfer function at `frequency_hz`, in degrees.
    #[wasm_bindgen]
    pub fn phase_deg(&self, frequency_hz: f64) -> f64 {
        sweep::phase_deg(self.filter.transfer_function(frequency_hz))
    }

    /// Cutoff, resonance and band-edge frequencies, possibly empty.
    #[wasm_bindgen]
    pub fn characteristic_frequencies(&self) -> Vec<f64> {
        self.filter.characteristic_frequencies()
    }

    /// Logarithmically spaced sweep frequencies.
    #[wasm_bindgen]
    pub fn sweep_frequencies(&self, start_hz: f64, stop_hz: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        config(start_hz, stop_hz, points)
            .frequencies()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Magnitudes in dB over the sweep.
    #[wasm_bindgen]
    pub fn sweep_magnitude_db(&self, start_hz: f64, stop_hz: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        let freqs = self.sweep_frequencies(start_hz, stop_hz, points)?;
        Ok(freqs.into_iter().map(|f| self.magnitude_db(f)).collect())
    }

    /// Phases in degrees over the sweep.
    #[wasm_bindgen]
    pub fn sweep_phase_deg(&self, start_hz: f64, stop_hz: f64, points: usize) -> Result<Vec<f64>, JsValue> {
        let freqs = self.sweep_frequencies(start_hz, stop_hz, points)?;
        Ok(freqs.into_iter().map(|f| self.phase_deg(f)).collect())
    }

    /// Canonical description of the filter.
    #[wasm_bindgen(getter)]
    pub fn description(&self) -> String {
        self.filter.to_string()
    }
}

fn config(start_hz: f64, stop_hz: f64, points: usize) -> SweepConfig {
    SweepConfig::new().with_range(start_hz, stop_hz).with_points(points)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default number of sweep points.
#[wasm_bindgen]
pub fn default_point_count() -> usize {
    crate::DEFAULT_POINT_COUNT
}
