//! Frequency sweeps and Bode diagram data.
//!
//! A sweep samples a filter's transfer function at logarithmically spaced
//! frequencies and converts every sample to magnitude in decibels and phase
//! in degrees. Characteristic frequencies become vertical markers spanning
//! [`MARKER_TOP_DB`] down to [`MARKER_BOTTOM_DB`].
//!
//! Rendering the diagram to an image is left to the caller; see
//! [`crate::output`] for the CSV writers.

use num_complex::Complex64;

use crate::error::{DipoleError, Result};
use crate::filters::Filter;
use crate::{DEFAULT_POINT_COUNT, DEFAULT_START_HZ, DEFAULT_STOP_HZ};

/// Upper end of a characteristic-frequency marker (dB).
pub const MARKER_TOP_DB: f64 = -3.0;

/// Lower end of a characteristic-frequency marker (dB).
pub const MARKER_BOTTOM_DB: f64 = -40.0;

/// Configuration for a frequency sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// First sampled frequency (Hz).
    pub start_hz: f64,
    /// End of the sampled decade range (Hz), not itself sampled.
    pub stop_hz: f64,
    /// Number of samples.
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_hz: DEFAULT_START_HZ,
            stop_hz: DEFAULT_STOP_HZ,
            points: DEFAULT_POINT_COUNT,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frequency range (Hz).
    pub fn with_range(mut self, start_hz: f64, stop_hz: f64) -> Self {
        self.start_hz = start_hz;
        self.stop_hz = stop_hz;
        self
    }

    /// Set the number of samples.
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Check that `0 < start < stop` and that at least one point is requested.
    pub fn validate(&self) -> Result<()> {
        if !(self.start_hz > 0.0 && self.start_hz.is_finite()) {
            return Err(DipoleError::invalid_argument(format!(
                "sweep start must be a positive frequency, got {}",
                self.start_hz
            )));
        }
        if !(self.stop_hz > self.start_hz && self.stop_hz.is_finite()) {
            return Err(DipoleError::invalid_argument(format!(
                "sweep stop ({}) must be above start ({})",
                self.stop_hz, self.start_hz
            )));
        }
        if self.points == 0 {
            return Err(DipoleError::invalid_argument("sweep needs at least one point"));
        }
        Ok(())
    }

    /// Sampled frequencies in ascending order.
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        self.validate()?;
        Ok(logspace(self.start_hz, self.stop_hz, self.points))
    }
}

/// `n` logarithmically spaced samples starting at `start`, stepping toward `stop`.
///
/// Sample `i` is `10^(log10(start) + i/n · (log10(stop) - log10(start)))`,
/// so `stop` itself is excluded.
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let log_start = start.log10();
    let span = stop.log10() - log_start;
    (0..n)
        .map(|i| 10f64.powf(log_start + i as f64 / n as f64 * span))
        .collect()
}

/// Magnitude in decibels: `20 · log10(|h|)`.
pub fn magnitude_db(h: Complex64) -> f64 {
    20.0 * h.norm().log10()
}

/// Phase in degrees.
pub fn phase_deg(h: Complex64) -> f64 {
    h.arg().to_degrees()
}

/// One sample of a frequency response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub response: Complex64,
}

impl ResponsePoint {
    pub fn magnitude_db(&self) -> f64 {
        magnitude_db(self.response)
    }

    pub fn phase_deg(&self) -> f64 {
        phase_deg(self.response)
    }
}

/// Vertical marker at a characteristic frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub frequency_hz: f64,
    pub from_db: f64,
    pub to_db: f64,
}

/// Sampled data behind a magnitude/phase diagram.
#[derive(Debug, Clone)]
pub struct BodeDiagram {
    pub title: String,
    pub points: Vec<ResponsePoint>,
    pub markers: Vec<Marker>,
}

impl BodeDiagram {
    /// Sample `filter` over the sweep described by `config`.
    pub fn sample<F>(title: impl Into<String>, filter: &F, config: &SweepConfig) -> Result<Self>
    where
        F: Filter + ?Sized,
    {
        let title = title.into();
        let frequencies = config.frequencies()?;
        tracing::debug!(
            title = %title,
            points = config.points,
            start_hz = config.start_hz,
            stop_hz = config.stop_hz,
            "sampling frequency response"
        );

        let points = frequencies
            .into_iter()
            .map(|frequency_hz| ResponsePoint {
                frequency_hz,
                response: filter.transfer_function(frequency_hz),
            })
            .collect();

        let markers = filter
            .characteristic_frequencies()
            .into_iter()
            .map(|frequency_hz| {
                tracing::trace!(frequency_hz, "characteristic frequency marker");
                Marker {
                    frequency_hz,
                    from_db: MARKER_TOP_DB,
                    to_db: MARKER_BOTTOM_DB,
                }
            })
            .collect();

        Ok(Self {
            title,
            points,
            markers,
        })
    }

    /// Frequencies of every sample.
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency_hz).collect()
    }

    /// Magnitudes in dB of every sample.
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.points.iter().map(ResponsePoint::magnitude_db).collect()
    }

    /// Phases in degrees of every sample.
    pub fn phases_deg(&self) -> Vec<f64> {
        self.points.iter().map(ResponsePoint::phase_deg).collect()
    }
}
