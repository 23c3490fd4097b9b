//! Conversion from parsed expressions to element trees and filters.

use std::sync::Arc;

use super::ast::{CompositeKind, ElementExpr, Expr, FilterExpr, LeafKind};
use crate::components::Element;
use crate::error::{DipoleError, Result};
use crate::filters::{Filter, ParallelFilter, RcFilter, RlcFilter, SeriesFilter};

/// Build an element tree from its expression.
pub fn build_element(expr: &ElementExpr) -> Result<Element> {
    match expr {
        ElementExpr::Leaf {
            kind,
            name,
            value,
            line,
        } => {
            if is_suspicious(*value) {
                tracing::warn!(name = %name, value, line, "non-positive or non-finite component value");
            }
            match kind {
                LeafKind::Resistor => Element::resistor(name.as_str(), *value),
                LeafKind::Capacitor => Element::capacitor(name.as_str(), *value),
                LeafKind::Inductor => Element::inductor(name.as_str(), *value),
            }
        }
        ElementExpr::Composite {
            kind,
            name,
            children,
            ..
        } => {
            let children = children
                .iter()
                .map(build_element)
                .collect::<Result<Vec<_>>>()?;
            match kind {
                CompositeKind::Series => Element::series(name.as_str(), children),
                CompositeKind::Parallel => Element::parallel(name.as_str(), children),
                CompositeKind::Divider => {
                    let mut children = children.into_iter();
                    match (children.next(), children.next(), children.next()) {
                        (Some(upper), Some(lower), None) => {
                            Element::divider(name.as_str(), upper, lower)
                        }
                        _ => Err(DipoleError::parse(
                            expr.line(),
                            format!("divider '{}' takes exactly two elements", name),
                        )),
                    }
                }
            }
        }
    }
}

/// Build a filter from its expression.
pub fn build_filter(expr: &FilterExpr) -> Result<Arc<dyn Filter>> {
    let filter: Arc<dyn Filter> = match expr {
        FilterExpr::Rc { ohms, farads, kind } => {
            check_parameters(&[("R", *ohms), ("C", *farads)]);
            Arc::new(RcFilter::new(*ohms, *farads, *kind))
        }
        FilterExpr::Rlc {
            ohms,
            farads,
            henrys,
            kind,
        } => {
            check_parameters(&[("R", *ohms), ("C", *farads), ("L", *henrys)]);
            Arc::new(RlcFilter::new(*ohms, *farads, *henrys, *kind))
        }
        FilterExpr::Divider(element) => match build_element(element)? {
            Element::Divider(divider) => Arc::new(divider),
            other => {
                return Err(DipoleError::parse(
                    element.line(),
                    format!("'{}' is not a divider", other.name()),
                ))
            }
        },
        FilterExpr::Cascade(stages) => Arc::new(SeriesFilter::new(
            stages.iter().map(build_filter).collect::<Result<Vec<_>>>()?,
        )?),
        FilterExpr::Sum(branches) => Arc::new(ParallelFilter::new(
            branches.iter().map(build_filter).collect::<Result<Vec<_>>>()?,
        )?),
    };
    Ok(filter)
}

/// Build a filter from any top-level expression.
///
/// Elements qualify only when they are dividers.
pub fn build_filter_from_expr(expr: &Expr) -> Result<Arc<dyn Filter>> {
    match expr {
        Expr::Filter(filter) => build_filter(filter),
        Expr::Element(element) if element.is_divider() => {
            build_filter(&FilterExpr::Divider(element.clone()))
        }
        Expr::Element(element) => Err(DipoleError::parse(
            element.line(),
            "only dividers can be used as filters",
        )),
    }
}

// Zero and negative values are legal and evaluate to IEEE infinities,
// but they are rarely intended.
fn is_suspicious(value: f64) -> bool {
    !(value > 0.0 && value.is_finite())
}

fn check_parameters(parameters: &[(&str, f64)]) {
    for &(name, value) in parameters {
        if is_suspicious(value) {
            tracing::warn!(name, value, "non-positive or non-finite filter parameter");
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dsl::parse;

    fn element(input: &str) -> Result<Element> {
        match parse(input)? {
            Expr::Element(e) => build_element(&e),
            Expr::Filter(_) => panic!("expected an element"),
        }
    }

    #[test]
    fn test_build_element_tree() {
        let e = element("Ser(S, Res(R1, 100), Par(P, Res(R2, 1k), Res(R3, 1k)))").unwrap();
        assert_eq!(e.name(), "S");
        assert_relative_eq!(e.resistance(), 600.0, max_relative = 1e-12);
        assert_eq!(e.children().len(), 2);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            element("Res(\"  \", 100)"),
            Err(DipoleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_build_filters() {
        let expr = parse("Cascade(RC(1k, 100n, lowpass), Div(D, Res(R1, 1), Res(R2, 1)))").unwrap();
        let filter = build_filter_from_expr(&expr).unwrap();
        // divider contributes a flat 1/2
        let h = filter.transfer_function(1.0);
        assert_relative_eq!(h.norm(), 0.5, max_relative = 1e-5);

        let divider = parse("Div(D, Res(R1, 3), Res(R2, 1))").unwrap();
        let h = build_filter_from_expr(&divider).unwrap().transfer_function(50.0);
        assert_relative_eq!(h.re, 0.25, epsilon = 1e-12);

        let series = parse("Ser(S, Res(R1, 1))").unwrap();
        assert!(build_filter_from_expr(&series).is_err());
    }
}
