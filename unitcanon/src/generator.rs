//! Code and label generator - attaches per-factor codes and labels
//!
//! Lookup misses never fail: the affected field is left as `None` and the
//! assembler drops whatever canonical string depends on it.

use crate::semantic::{ParsedExpression, UnitFactor};
use crate::tables::LookupTables;
use tracing::trace;

/// Unit label whose prefixed forms drop the prefix's final vowel
const ARE_LABEL: &str = "are";

pub fn enrich(expression: &mut ParsedExpression, tables: &LookupTables) {
    let with_si = !expression.has_conventional();
    for factor in &mut expression.factors {
        factor.ucum_code = Some(format!("{}{}", factor.prefix, factor.symbol));
        factor.si_code = if with_si {
            si_code(factor, tables)
        } else {
            None
        };
        factor.label = label(factor, tables);
        trace!(
            factor = %factor,
            si_code = ?factor.si_code,
            label = ?factor.label,
            "enriched factor"
        );
    }
}

/// SI brochure spelling of prefix + symbol, without exponent
pub fn si_code(factor: &UnitFactor, tables: &LookupTables) -> Option<String> {
    let unit_symbol = tables.unit(&factor.symbol)?.si_symbol.as_deref()?;
    let prefix_symbol = if factor.has_prefix() {
        tables
            .prefix(&factor.prefix)
            .and_then(|p| p.si_symbol.as_deref())
            .unwrap_or(&factor.prefix)
    } else {
        ""
    };
    Some(format!("{}{}", prefix_symbol, unit_symbol))
}

/// `[exponent word ]prefix label + unit label`, e.g. "square kilometre"
pub fn label(factor: &UnitFactor, tables: &LookupTables) -> Option<String> {
    let unit_label = tables.unit(&factor.symbol)?.label.as_str();
    let prefix = prefix_label(factor, unit_label, tables)?;
    let stem = format!("{}{}", prefix, unit_label);

    match factor.exponent.unsigned_abs() {
        1 => Some(stem),
        _ => {
            let word = tables.exponent_word(factor.exponent)?;
            Some(format!("{} {}", word, stem))
        }
    }
}

fn prefix_label<'a>(
    factor: &UnitFactor,
    unit_label: &str,
    tables: &'a LookupTables,
) -> Option<&'a str> {
    if !factor.has_prefix() {
        return Some("");
    }
    let label = tables.prefix(&factor.prefix)?.label.as_str();
    if unit_label != ARE_LABEL {
        return Some(label);
    }
    Some(match label {
        "hecto" => "hect",
        "deca" => "dec",
        other => other,
    })
}
