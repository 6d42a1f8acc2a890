//! Unit symbol resolution - maps matched grammar alternatives to prefix, symbol and class

use crate::ast::{SimpleUnit, Span, UnitClass};
use crate::error::CanonError;
use crate::parser::Rule;
use pest::iterators::Pair;
use std::sync::Arc;

/// Tokens matched whole by the `exception` terminal, with the prefix and
/// symbol they stand for.
const EXCEPTIONS: &[(&str, &str, &str)] = &[("dar", "d", "ar")];

pub(crate) fn parse_annotatable(
    pair: Pair<Rule>,
    source: &Arc<str>,
) -> Result<SimpleUnit, CanonError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut unit = None;
    let mut exponent = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::simple_unit => unit = Some(parse_simple_unit(inner_pair)?),
            Rule::exponent => exponent = Some(parse_exponent(&inner_pair, source)?),
            _ => {}
        }
    }

    let (prefix, symbol, class) = unit.ok_or_else(|| {
        CanonError::Engine(format!("Missing unit symbol in '{}'", source))
    })?;

    Ok(SimpleUnit {
        prefix,
        symbol,
        class,
        exponent,
        span,
    })
}

fn parse_simple_unit(pair: Pair<Rule>) -> Result<(Option<String>, String, UnitClass), CanonError> {
    let alternative = pair
        .into_inner()
        .next()
        .ok_or_else(|| CanonError::Engine("Empty simple unit".to_string()))?;

    match alternative.as_rule() {
        Rule::exception_unit => resolve_exception(alternative.as_str()),
        Rule::prefixed_metric_unit => {
            let mut inner = alternative.into_inner();
            let prefix = inner
                .next()
                .ok_or_else(|| CanonError::Engine("Missing prefix".to_string()))?;
            let metric = inner
                .next()
                .ok_or_else(|| CanonError::Engine("Missing metric symbol".to_string()))?;
            Ok((
                Some(prefix.as_str().to_string()),
                metric.as_str().to_string(),
                UnitClass::Metric,
            ))
        }
        Rule::metric_unit | Rule::non_prefixable_unit => {
            Ok((None, alternative.as_str().to_string(), UnitClass::Metric))
        }
        Rule::conventional_unit | Rule::bracketed_unit | Rule::mixed_bracket_unit => Ok((
            None,
            alternative.as_str().to_string(),
            UnitClass::Conventional,
        )),
        other => Err(CanonError::Engine(format!(
            "Unexpected unit rule: {:?}",
            other
        ))),
    }
}

fn resolve_exception(token: &str) -> Result<(Option<String>, String, UnitClass), CanonError> {
    EXCEPTIONS
        .iter()
        .find(|(exception, _, _)| *exception == token)
        .map(|(_, prefix, symbol)| {
            (
                Some(prefix.to_string()),
                symbol.to_string(),
                UnitClass::Metric,
            )
        })
        .ok_or_else(|| CanonError::Engine(format!("Unknown exception token '{}'", token)))
}

fn parse_exponent(pair: &Pair<Rule>, source: &Arc<str>) -> Result<i32, CanonError> {
    pair.as_str().parse::<i32>().map_err(|_| {
        CanonError::parse_with_suggestion(
            format!("exponent '{}' is out of range", pair.as_str()),
            Span::from_pest_span(pair.as_span()),
            source.clone(),
            "Use an exponent between -2147483648 and 2147483647",
        )
    })
}
