//! Canonical assembler - orders factors and renders the canonical strings
//!
//! Factors with a negative exponent form the denominator. Each side is sorted
//! by case-folded code, ties broken by the full factor record, so any
//! reordering of the same factors renders identically.

use crate::semantic::{with_exponent, ParsedExpression, UnitFactor};
use crate::tables::LookupTables;
use serde::Serialize;
use std::cmp::Ordering;

/// Official SI definition of the kilogram, used instead of the prefix phrase for `kg`
pub const KILOGRAM_DEFINITION: &str = "An SI base unit which 1) is the SI unit of mass and 2) is defined by taking the fixed numerical value of the Planck constant, h, to be 6.626 070 15 × 10⁻³⁴ when expressed in the unit joule second, which is equal to kilogram square metre per second, where the metre and the second are defined in terms of c and ∆νCs.";

const DEFINITION_START: &str = "A unit which is equal to ";

/// Numerator and denominator factors, each in canonical order
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    pub numerator: Vec<&'a UnitFactor>,
    pub denominator: Vec<&'a UnitFactor>,
}

impl<'a> Split<'a> {
    /// All factors, numerator first
    pub fn factors(&self) -> impl Iterator<Item = &'a UnitFactor> + '_ {
        self.numerator
            .iter()
            .chain(self.denominator.iter())
            .copied()
    }
}

pub fn split(expression: &ParsedExpression) -> Split<'_> {
    let (mut numerator, mut denominator): (Vec<&UnitFactor>, Vec<&UnitFactor>) = expression
        .factors
        .iter()
        .partition(|factor| !factor.is_denominator());
    numerator.sort_by(|a, b| canonical_order(a, b));
    denominator.sort_by(|a, b| canonical_order(a, b));
    Split {
        numerator,
        denominator,
    }
}

/// Case-folded code first, then the derived order of the whole record
pub fn canonical_order(a: &UnitFactor, b: &UnitFactor) -> Ordering {
    a.code()
        .to_lowercase()
        .cmp(&b.code().to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The canonical strings of one expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canonical {
    pub ucum_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

pub fn assemble(expression: &ParsedExpression, tables: &LookupTables) -> Canonical {
    let split = split(expression);
    Canonical {
        ucum_code: ucum_code(&split),
        si_code: si_code(&split),
        label: label(&split),
        definition: definition(&split, tables),
    }
}

/// Factor codes with exponents joined by "."; denominators keep their sign
pub fn ucum_code(split: &Split) -> String {
    split
        .factors()
        .map(UnitFactor::code_with_exponent)
        .collect::<Vec<_>>()
        .join(".")
}

/// Factor SI codes with exponents joined by a space
pub fn si_code(split: &Split) -> Option<String> {
    let parts = split
        .factors()
        .map(|factor| {
            factor
                .si_code
                .as_deref()
                .map(|code| with_exponent(code, factor.exponent))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(" "))
}

pub fn label(split: &Split) -> Option<String> {
    let numerator = labels(&split.numerator)?;
    let denominator = labels(&split.denominator)?;

    let mut words = Vec::with_capacity(numerator.len() + denominator.len() + 1);
    if denominator.is_empty() {
        words.extend(numerator);
    } else if numerator.is_empty() {
        words.push("reciprocal");
        words.extend(denominator);
    } else {
        words.extend(numerator);
        words.push("per");
        words.extend(denominator);
    }
    Some(words.join(" "))
}

fn labels<'a>(factors: &[&'a UnitFactor]) -> Option<Vec<&'a str>> {
    factors.iter().map(|factor| factor.label.as_deref()).collect()
}

pub fn definition(split: &Split, tables: &LookupTables) -> Option<String> {
    match (split.numerator.as_slice(), split.denominator.as_slice()) {
        ([single], []) if single.exponent == 1 => single_unit_definition(single, tables),
        (numerator, []) => Some(format!(
            "{}{}.",
            DEFINITION_START,
            phrases(numerator, tables)?
        )),
        ([], denominator) => Some(format!(
            "{}the reciprocal of {}.",
            DEFINITION_START,
            phrases(denominator, tables)?
        )),
        (numerator, denominator) => Some(format!(
            "{}{} per {}.",
            DEFINITION_START,
            phrases(numerator, tables)?,
            phrases(denominator, tables)?
        )),
    }
}

fn single_unit_definition(factor: &UnitFactor, tables: &LookupTables) -> Option<String> {
    if !factor.has_prefix() {
        return tables.unit(&factor.symbol)?.definition.clone();
    }
    if factor.prefix == "k" && factor.symbol == "g" {
        return Some(KILOGRAM_DEFINITION.to_string());
    }
    let magnitude = tables.prefix(&factor.prefix)?.magnitude;
    let base_label = &tables.unit(&factor.symbol)?.label;
    Some(format!("{}10^{} {}.", DEFINITION_START, magnitude, base_label))
}

fn phrases(factors: &[&UnitFactor], tables: &LookupTables) -> Option<String> {
    let parts = factors
        .iter()
        .map(|factor| phrase(factor, tables))
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(" by "))
}

/// `<scale> [<exponent word>] <unit label>`, e.g. "10^3 square metre"
fn phrase(factor: &UnitFactor, tables: &LookupTables) -> Option<String> {
    let base_label = &tables.unit(&factor.symbol)?.label;
    let scale = if factor.has_prefix() {
        format!("10^{}", tables.prefix(&factor.prefix)?.magnitude)
    } else {
        "1".to_string()
    };
    match factor.exponent.unsigned_abs() {
        1 => Some(format!("{} {}", scale, base_label)),
        _ => Some(format!(
            "{} {} {}",
            scale,
            tables.exponent_word(factor.exponent)?,
            base_label
        )),
    }
}
