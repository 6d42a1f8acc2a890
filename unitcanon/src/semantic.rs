use crate::ast::UnitClass;
use serde::Serialize;
use std::fmt;

/// One prefix + unit + exponent term of a normalized expression.
///
/// Created by the normalizer with a non-zero exponent; the derived
/// `ucum_code`, `si_code` and `label` fields are attached by the generator.
/// The derived ordering compares fields in declaration order and is the
/// tie-breaker of the canonical factor order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnitFactor {
    /// Empty when no prefix was written
    pub prefix: String,
    pub symbol: String,
    pub class: UnitClass,
    pub exponent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ucum_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl UnitFactor {
    pub fn new(
        prefix: impl Into<String>,
        symbol: impl Into<String>,
        class: UnitClass,
        exponent: i32,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            symbol: symbol.into(),
            class,
            exponent,
            ucum_code: None,
            si_code: None,
            label: None,
        }
    }

    /// The UCUM code of this factor without exponent
    pub fn code(&self) -> String {
        match &self.ucum_code {
            Some(code) => code.clone(),
            None => format!("{}{}", self.prefix, self.symbol),
        }
    }

    /// `code` for exponent 1, otherwise `code` followed by the signed exponent
    pub fn code_with_exponent(&self) -> String {
        with_exponent(&self.code(), self.exponent)
    }

    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }

    pub fn is_denominator(&self) -> bool {
        self.exponent < 0
    }

    pub fn is_conventional(&self) -> bool {
        self.class == UnitClass::Conventional
    }
}

impl fmt::Display for UnitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_with_exponent())
    }
}

/// Render a code with its exponent, omitting an exponent of 1
pub fn with_exponent(code: &str, exponent: i32) -> String {
    if exponent == 1 {
        code.to_string()
    } else {
        format!("{}{}", code, exponent)
    }
}

/// The factor sequence of one input, in parse order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedExpression {
    pub source: String,
    pub factors: Vec<UnitFactor>,
}

impl ParsedExpression {
    pub fn new(source: impl Into<String>, factors: Vec<UnitFactor>) -> Self {
        Self {
            source: source.into(),
            factors,
        }
    }

    /// True when any factor comes from a conventional (non-SI) unit class
    pub fn has_conventional(&self) -> bool {
        self.factors.iter().any(UnitFactor::is_conventional)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
