//! Composite elements: Series, Parallel and the two-arm voltage Divider.
//!
//! Children are held behind [`Arc`] so the same element can take part in
//! several trees. Evaluation is a depth-first recursion over the children.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use super::{validate_name, Element};
use crate::error::{DipoleError, Result};

fn collect_children<I>(name: &str, children: I) -> Result<Vec<Arc<Element>>>
where
    I: IntoIterator,
    I::Item: Into<Arc<Element>>,
{
    let children: Vec<Arc<Element>> = children.into_iter().map(Into::into).collect();
    if children.is_empty() {
        return Err(DipoleError::invalid_argument(format!(
            "composite '{}' needs at least one element",
            name
        )));
    }
    Ok(children)
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Arc<Element>]) -> fmt::Result {
    for child in children {
        write!(f, ", {}", child)?;
    }
    Ok(())
}

/// `1 / z` by Smith's method, with `1 / 0 = ∞` as for reals.
///
/// The textbook formula evaluates `∞ · 0` and returns NaN for infinite
/// operands; this form returns `0` for `1 / (0 - ∞j)`.
fn reciprocal(z: Complex64) -> Complex64 {
    let (c, d) = (z.re, z.im);
    if c == 0.0 && d == 0.0 {
        return Complex64::new(f64::INFINITY, 0.0);
    }
    if d.abs() <= c.abs() {
        let r = d / c;
        let den = c + d * r;
        Complex64::new(1.0 / den, -r / den)
    } else {
        let r = c / d;
        let den = d + c * r;
        Complex64::new(r / den, -1.0 / den)
    }
}

/// Elements connected one after another: resistances and impedances add.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    children: Vec<Arc<Element>>,
}

impl Series {
    /// Create a series connection of `children`, in order.
    pub fn new<I>(name: impl Into<String>, children: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Element>>,
    {
        let name = validate_name(name)?;
        let children = collect_children(&name, children)?;
        Ok(Self { name, children })
    }

    pub(crate) fn named(name: &'static str, children: Vec<Arc<Element>>) -> Self {
        Self {
            name: name.to_string(),
            children,
        }
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child elements in construction order.
    pub fn children(&self) -> &[Arc<Element>] {
        &self.children
    }

    /// Sum of the children's DC resistances.
    pub fn resistance(&self) -> f64 {
        self.children.iter().map(|c| c.resistance()).sum()
    }

    /// Sum of the children's impedances.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        let mut total = Complex64::new(0.0, 0.0);
        for child in &self.children {
            total += child.impedance(frequency_hz);
        }
        total
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ser({}", self.name)?;
        write_children(f, &self.children)?;
        write!(f, ")")
    }
}

/// Elements sharing both terminals: admittances add.
///
/// A zero-resistance branch makes its reciprocal infinite, which drives the
/// combined resistance to zero. Impedance follows the same rules: a
/// zero-impedance branch shorts the combination to `0 + 0j`, and an
/// infinite-impedance branch (a capacitor at DC) contributes no admittance.
#[derive(Debug, Clone)]
pub struct Parallel {
    name: String,
    children: Vec<Arc<Element>>,
}

impl Parallel {
    /// Create a parallel connection of `children`.
    pub fn new<I>(name: impl Into<String>, children: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Element>>,
    {
        let name = validate_name(name)?;
        let children = collect_children(&name, children)?;
        Ok(Self { name, children })
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child elements in construction order.
    pub fn children(&self) -> &[Arc<Element>] {
        &self.children
    }

    /// `1 / Σ(1 / Ri)`
    pub fn resistance(&self) -> f64 {
        let conductance: f64 = self.children.iter().map(|c| 1.0 / c.resistance()).sum();
        1.0 / conductance
    }

    /// `1 / Σ(1 / Zi)`
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        let admittance: Complex64 = self
            .children
            .iter()
            .map(|c| reciprocal(c.impedance(frequency_hz)))
            .sum();
        reciprocal(admittance)
    }
}

impl fmt::Display for Parallel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Par({}", self.name)?;
        write_children(f, &self.children)?;
        write!(f, ")")
    }
}

/// Two-arm voltage divider.
///
/// Electrically the two arms are in series; the output voltage is taken
/// across the lower arm, so the transfer function is
///   H(f) = Z_lower / (Z_upper + Z_lower)
#[derive(Debug, Clone)]
pub struct Divider {
    name: String,
    upper: Arc<Element>,
    lower: Arc<Element>,
}

impl Divider {
    /// Create a divider with `upper` on the input side and the output across `lower`.
    pub fn new(
        name: impl Into<String>,
        upper: impl Into<Arc<Element>>,
        lower: impl Into<Arc<Element>>,
    ) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            upper: upper.into(),
            lower: lower.into(),
        })
    }

    pub(crate) fn named(name: &'static str, upper: Element, lower: Element) -> Self {
        Self {
            name: name.to_string(),
            upper: Arc::new(upper),
            lower: Arc::new(lower),
        }
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input-side arm.
    pub fn upper(&self) -> &Arc<Element> {
        &self.upper
    }

    /// Output-side arm.
    pub fn lower(&self) -> &Arc<Element> {
        &self.lower
    }

    /// Series resistance of both arms.
    pub fn resistance(&self) -> f64 {
        self.upper.resistance() + self.lower.resistance()
    }

    /// Series impedance of both arms.
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        self.upper.impedance(frequency_hz) + self.lower.impedance(frequency_hz)
    }

    /// Output/input voltage ratio at `frequency_hz`.
    pub fn transfer_function(&self, frequency_hz: f64) -> Complex64 {
        let z1 = self.upper.impedance(frequency_hz);
        let z2 = self.lower.impedance(frequency_hz);
        z2 / (z1 + z2)
    }
}

impl fmt::Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Div({}, {}, {})", self.name, self.upper, self.lower)
    }
}
