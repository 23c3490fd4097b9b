//! Frequency-domain filters.
//!
//! A [`Filter`] exposes a complex transfer function `H(f)` and a list of
//! characteristic frequencies (cutoff, resonance, band edges).
//!
//! - [`RcFilter`] and [`RlcFilter`] build a [`Divider`] whose arm layout
//!   encodes the filter kind; the transfer function is the divider's.
//! - [`SeriesFilter`] cascades stages by multiplying their responses,
//!   assuming ideal unloaded stages.
//! - [`ParallelFilter`] sums the responses of its branches.
//! - A bare [`Divider`] is itself a filter without characteristic frequencies.

mod rc;
mod rlc;

pub use rc::{RcFilter, RcKind};
pub use rlc::{RlcFilter, RlcKind};

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::components::Divider;
use crate::error::{DipoleError, Result};

/// Anything with a transfer function.
pub trait Filter: fmt::Debug + fmt::Display + Send + Sync {
    /// Output/input voltage ratio at `frequency_hz`.
    fn transfer_function(&self, frequency_hz: f64) -> Complex64;

    /// Frequencies of interest, empty when none are meaningful.
    fn characteristic_frequencies(&self) -> Vec<f64>;
}

impl Filter for Divider {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        Divider::transfer_function(self, frequency_hz)
    }

    fn characteristic_frequencies(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl<F: Filter + ?Sized> Filter for Arc<F> {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        (**self).transfer_function(frequency_hz)
    }

    fn characteristic_frequencies(&self) -> Vec<f64> {
        (**self).characteristic_frequencies()
    }
}

fn collect_stages<I, F>(kind: &str, stages: I) -> Result<Vec<Arc<dyn Filter>>>
where
    I: IntoIterator<Item = F>,
    F: Into<Arc<dyn Filter>>,
{
    let stages: Vec<Arc<dyn Filter>> = stages.into_iter().map(Into::into).collect();
    if stages.is_empty() {
        return Err(DipoleError::invalid_argument(format!(
            "{} needs at least one filter",
            kind
        )));
    }
    Ok(stages)
}

fn write_stages(f: &mut fmt::Formatter<'_>, kind: &str, stages: &[Arc<dyn Filter>]) -> fmt::Result {
    write!(f, "{}(", kind)?;
    for (i, stage) in stages.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", stage)?;
    }
    write!(f, ")")
}

/// Cascade of filter stages: `H(f) = Π Hi(f)`.
#[derive(Debug, Clone)]
pub struct SeriesFilter {
    stages: Vec<Arc<dyn Filter>>,
}

impl SeriesFilter {
    /// Create a cascade from the given stages, first stage first.
    pub fn new<I, F>(stages: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Arc<dyn Filter>>,
    {
        Ok(Self {
            stages: collect_stages("SeriesFilter", stages)?,
        })
    }

    /// The cascaded stages.
    pub fn stages(&self) -> &[Arc<dyn Filter>] {
        &self.stages
    }
}

impl Filter for SeriesFilter {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        let mut total = Complex64::new(1.0, 0.0);
        for stage in &self.stages {
            total *= stage.transfer_function(frequency_hz);
        }
        total
    }

    /// Combined characteristic points are not derived from the stages.
    fn characteristic_frequencies(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl fmt::Display for SeriesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stages(f, "SeriesFilter", self.stages())
    }
}

/// Summing node over filter branches: `H(f) = Σ Hi(f)`.
#[derive(Debug, Clone)]
pub struct ParallelFilter {
    branches: Vec<Arc<dyn Filter>>,
}

impl ParallelFilter {
    /// Create a summing filter from the given branches.
    pub fn new<I, F>(branches: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Arc<dyn Filter>>,
    {
        Ok(Self {
            branches: collect_stages("ParallelFilter", branches)?,
        })
    }

    /// The summed branches.
    pub fn branches(&self) -> &[Arc<dyn Filter>] {
        &self.branches
    }
}

impl Filter for ParallelFilter {
    fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        let mut total = Complex64::new(0.0, 0.0);
        for branch in &self.branches {
            total += branch.transfer_function(frequency_hz);
        }
        total
    }

    fn characteristic_frequencies(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl fmt::Display for ParallelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stages(f, "ParallelFilter", self.branches())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::components::Element;

    fn lowpass(r: f64, c: f64) -> Arc<dyn Filter> {
        Arc::new(RcFilter::new(r, c, RcKind::Lowpass))
    }

    #[test]
    fn test_divider_is_a_filter() {
        let d = Divider::new(
            "D",
            Element::resistor("R1", 1.0).unwrap(),
            Element::resistor("R2", 1.0).unwrap(),
        )
        .unwrap();
        let filter: &dyn Filter = &d;
        assert_relative_eq!(filter.transfer_function(100.0).re, 0.5);
        assert!(filter.characteristic_frequencies().is_empty());
    }

    #[test]
    fn test_series_filter_multiplies_responses() {
        let f1 = lowpass(1e3, 10e-9);
        let f2 = lowpass(100e3, 0.1e-9);
        let cascade = SeriesFilter::new([f1.clone(), f2.clone()]).unwrap();
        for f in [10.0, 1e3, 15915.0, 1e5] {
            let expected = f1.transfer_function(f) * f2.transfer_function(f);
            let h = cascade.transfer_function(f);
            assert_relative_eq!(h.re, expected.re, max_relative = 1e-12);
            assert_relative_eq!(h.im, expected.im, max_relative = 1e-12);
        }
        assert!(cascade.characteristic_frequencies().is_empty());
    }

    #[test]
    fn test_parallel_filter_sums_responses() {
        let lp: Arc<dyn Filter> = Arc::new(RcFilter::new(1e3, 1e-7, RcKind::Lowpass));
        let hp: Arc<dyn Filter> = Arc::new(RcFilter::new(1e3, 1e-7, RcKind::Highpass));
        let sum = ParallelFilter::new([lp, hp]).unwrap();
        // Complementary RC halves always add up to unity.
        for f in [10.0, 1591.5, 1e5] {
            let h = sum.transfer_function(f);
            assert_relative_eq!(h.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(h.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nested_composites() {
        let inner = SeriesFilter::new([lowpass(1e3, 1e-7)]).unwrap();
        let outer = ParallelFilter::new([
            Arc::new(inner) as Arc<dyn Filter>,
            lowpass(1e3, 1e-7),
        ])
        .unwrap();
        let h = outer.transfer_function(1.0);
        assert_relative_eq!(h.re, 2.0, epsilon = 1e-5);
        assert_eq!(outer.branches().len(), 2);
    }

    #[test]
    fn test_stages_keep_order() {
        let first = lowpass(1e3, 1e-7);
        let second: Arc<dyn Filter> = Arc::new(RcFilter::new(2e3, 1e-7, RcKind::Highpass));
        let cascade = SeriesFilter::new([first.clone(), second.clone()]).unwrap();
        assert_eq!(cascade.stages().len(), 2);
        assert!(Arc::ptr_eq(&cascade.stages()[0], &first));
        assert!(Arc::ptr_eq(&cascade.stages()[1], &second));
    }

    #[test]
    fn test_empty_composite_filters_are_rejected() {
        let none: Vec<Arc<dyn Filter>> = Vec::new();
        assert!(matches!(
            SeriesFilter::new(none.clone()),
            Err(DipoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ParallelFilter::new(none),
            Err(DipoleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_display() {
        let cascade = SeriesFilter::new([lowpass(1e3, 0.5)]).unwrap();
        assert!(cascade.to_string().starts_with("SeriesFilter(RCFilter(R=1000 Ω"));

        let sum = ParallelFilter::new([lowpass(1e3, 0.5), lowpass(2e3, 0.5)]).unwrap();
        let text = sum.to_string();
        assert!(text.starts_with("ParallelFilter(RCFilter(R=1000 Ω"));
        assert!(text.contains(", RCFilter(R=2000 Ω"));
    }
}
