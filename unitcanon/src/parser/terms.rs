use crate::ast::{Component, Operator, Span, Term, UnitExpr};
use crate::error::CanonError;
use crate::parser::Rule;
use pest::iterators::Pair;
use std::sync::Arc;

pub(crate) fn parse_expression(
    pair: Pair<Rule>,
    source: &Arc<str>,
) -> Result<UnitExpr, CanonError> {
    let mut leading_division = false;
    let mut term = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::leading_division => leading_division = true,
            Rule::term => term = Some(parse_term(inner_pair, source)?),
            _ => {}
        }
    }

    let term = term.ok_or_else(|| {
        CanonError::Engine(format!("Expression '{}' has no term", source))
    })?;

    Ok(UnitExpr {
        leading_division,
        term,
    })
}

/// Fold `component (operator component)*` into a left-associative chain.
fn parse_term(pair: Pair<Rule>, source: &Arc<str>) -> Result<Term, CanonError> {
    let mut term: Option<Term> = None;
    let mut pending_operator: Option<Operator> = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::operator => pending_operator = Some(parse_operator(&inner_pair)?),
            Rule::component => {
                let component = parse_component(inner_pair, source)?;
                term = Some(match (term, pending_operator.take()) {
                    (None, _) => Term::Leaf(component),
                    (Some(head), Some(operator)) => Term::Chain {
                        head: Box::new(head),
                        operator,
                        tail: component,
                    },
                    (Some(_), None) => {
                        return Err(CanonError::Engine(format!(
                            "Component without operator in '{}'",
                            source
                        )))
                    }
                });
            }
            _ => {}
        }
    }

    term.ok_or_else(|| CanonError::Engine(format!("Empty term in '{}'", source)))
}

fn parse_operator(pair: &Pair<Rule>) -> Result<Operator, CanonError> {
    match pair.as_str() {
        "." => Ok(Operator::Multiply),
        "/" => Ok(Operator::Divide),
        other => Err(CanonError::Engine(format!("Unknown operator '{}'", other))),
    }
}

fn parse_component(pair: Pair<Rule>, source: &Arc<str>) -> Result<Component, CanonError> {
    let inner_pair = pair
        .into_inner()
        .next()
        .ok_or_else(|| CanonError::Engine("Empty component".to_string()))?;

    match inner_pair.as_rule() {
        Rule::annotatable => Ok(Component::Unit(crate::parser::units::parse_annotatable(
            inner_pair, source,
        )?)),
        Rule::factor => Ok(Component::Number {
            digits: inner_pair.as_str().to_string(),
            span: Span::from_pest_span(inner_pair.as_span()),
        }),
        other => Err(CanonError::Engine(format!(
            "Unexpected component rule: {:?}",
            other
        ))),
    }
}
