use crate::ast::{Span, UnitExpr};
use crate::error::CanonError;
use pest::error::{ErrorVariant, InputLocation, LineColLocation};
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod terms;
pub mod units;

#[derive(Parser)]
#[grammar = "src/parser/units.pest"]
pub struct UnitParser;

/// Parse a unit expression into its structural tree.
///
/// Leading and trailing whitespace is ignored. Any input that does not
/// derive from the grammar is rejected with [`CanonError::Parse`].
pub fn parse(input: &str) -> Result<UnitExpr, CanonError> {
    let trimmed = input.trim();
    let source: Arc<str> = Arc::from(trimmed);

    match UnitParser::parse(Rule::expression, trimmed) {
        Ok(mut pairs) => {
            let expression = pairs.next().ok_or_else(|| {
                CanonError::Engine(format!("No parse result for '{}'", trimmed))
            })?;
            terms::parse_expression(expression, &source)
        }
        Err(e) => Err(syntax_error(e, &source)),
    }
}

fn syntax_error(error: pest::error::Error<Rule>, source: &Arc<str>) -> CanonError {
    let start = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let (line, col) = match error.line_col {
        LineColLocation::Pos(line_col) => line_col,
        LineColLocation::Span(line_col, _) => line_col,
    };

    let token = unrecognized_token(source, start);
    let span = Span {
        start,
        end: start + token.len(),
        line,
        col,
    };

    let message = match &error.variant {
        ErrorVariant::ParsingError { .. } if source.is_empty() => {
            "empty unit expression".to_string()
        }
        ErrorVariant::ParsingError { .. } if token.is_empty() => {
            "unit expression ended unexpectedly".to_string()
        }
        ErrorVariant::ParsingError { .. } => format!("unrecognized input '{}'", token),
        ErrorVariant::CustomError { message } => message.clone(),
    };

    if token.is_empty() {
        CanonError::parse(message, span, source.clone())
    } else {
        CanonError::parse_with_suggestion(
            message,
            span,
            source.clone(),
            format!(
                "'{}' is not a known prefix, unit symbol, exponent or operator at this position",
                token
            ),
        )
    }
}

/// The run of input starting at `start` up to the next operator or space
fn unrecognized_token(source: &str, start: usize) -> &str {
    let rest = source.get(start..).unwrap_or("");
    let mut chars = rest.char_indices();
    match chars.next() {
        None => "",
        Some((_, c)) if matches!(c, '.' | '/' | ' ') => &rest[..c.len_utf8()],
        Some(_) => {
            let end = rest
                .char_indices()
                .find(|(_, c)| matches!(c, '.' | '/' | ' '))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            &rest[..end]
        }
    }
}
