//! Factor normalizer - flattens a parse tree into a factor sequence
//!
//! Operators become exponent signs: a factor written after "/" (or the first
//! factor of an expression that starts with "/") has its exponent negated.
//! Factors without an exponent get 1 before the sign is applied.

use crate::ast::{Component, Operator, SimpleUnit, Term, UnitExpr};
use crate::error::CanonError;
use crate::semantic::{ParsedExpression, UnitFactor};
use crate::CanonResult;
use std::sync::Arc;

pub fn normalize(expr: &UnitExpr, source: &str) -> CanonResult<ParsedExpression> {
    let source_text: Arc<str> = Arc::from(source);
    let mut components = Vec::with_capacity(expr.term.component_count());
    flatten(&expr.term, &mut components);

    let mut factors = Vec::with_capacity(components.len());
    for (index, (operator, component)) in components.into_iter().enumerate() {
        let inverted = match operator {
            Some(Operator::Divide) => true,
            Some(Operator::Multiply) => false,
            None => index == 0 && expr.leading_division,
        };
        factors.push(to_factor(component, inverted, &source_text)?);
    }

    Ok(ParsedExpression::new(source, factors))
}

/// Components in source order, each paired with the operator written before it
fn flatten<'a>(term: &'a Term, out: &mut Vec<(Option<Operator>, &'a Component)>) {
    match term {
        Term::Leaf(component) => out.push((None, component)),
        Term::Chain {
            head,
            operator,
            tail,
        } => {
            flatten(head, out);
            out.push((Some(*operator), tail));
        }
    }
}

fn to_factor(
    component: &Component,
    inverted: bool,
    source: &Arc<str>,
) -> CanonResult<UnitFactor> {
    let unit = match component {
        Component::Unit(unit) => unit,
        Component::Number { digits, span } => {
            return Err(CanonError::normalize_with_suggestion(
                format!("numeric factor '{}' has no unit symbol", digits),
                span.clone(),
                source.clone(),
                "Write the quantity without a bare number",
            ))
        }
    };

    let exponent = exponent_of(unit, source)?;
    let exponent = if inverted { -exponent } else { exponent };

    Ok(UnitFactor::new(
        unit.prefix.clone().unwrap_or_default(),
        unit.symbol.clone(),
        unit.class,
        exponent,
    ))
}

fn exponent_of(unit: &SimpleUnit, source: &Arc<str>) -> CanonResult<i32> {
    match unit.exponent {
        None => Ok(1),
        Some(0) => Err(CanonError::normalize_with_suggestion(
            format!("'{}' has a zero exponent", unit),
            unit.span.clone(),
            source.clone(),
            "Remove the factor or give it a non-zero exponent",
        )),
        // Denominator rendering and inversion both need |exponent| to fit an i32
        Some(i32::MIN) => Err(CanonError::normalize_with_suggestion(
            format!("exponent of '{}' is out of range", unit),
            unit.span.clone(),
            source.clone(),
            "Use an exponent between -2147483647 and 2147483647",
        )),
        Some(exponent) => Ok(exponent),
    }
}
