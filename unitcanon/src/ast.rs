//! Parse tree types
//!
//! This module contains the structural result of parsing a unit expression:
//! - `Span` for tracking source locations inside the expression
//! - `UnitExpr`, `Term` and `Component`, the closed set of tree nodes
//! - `SimpleUnit`, a single prefix + symbol + exponent leaf

use serde::Serialize;
use std::fmt;

/// Span representing a location in the source expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }
}

/// Which grammar family a unit symbol was matched from.
///
/// Prefixable, non-prefixable and exception symbols are all metric; the
/// three conventional classes (plain, bracketed, mixed) are conventional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Metric,
    Conventional,
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitClass::Metric => write!(f, "metric"),
            UnitClass::Conventional => write!(f, "conventional"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Multiply,
    Divide,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Multiply => write!(f, "."),
            Operator::Divide => write!(f, "/"),
        }
    }
}

/// A whole expression: an optional leading "/" followed by a term
#[derive(Debug, Clone, PartialEq)]
pub struct UnitExpr {
    pub leading_division: bool,
    pub term: Term,
}

/// Left-associative chain of components
///
/// `a.b/c` is `Chain(Chain(Leaf(a), ., b), /, c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Leaf(Component),
    Chain {
        head: Box<Term>,
        operator: Operator,
        tail: Component,
    },
}

impl Term {
    /// Number of components in the chain
    pub fn component_count(&self) -> usize {
        match self {
            Term::Leaf(_) => 1,
            Term::Chain { head, .. } => head.component_count() + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Unit(SimpleUnit),
    /// A bare integer factor such as the `12` in `[ligne]/12`
    Number { digits: String, span: Span },
}

impl Component {
    pub fn span(&self) -> &Span {
        match self {
            Component::Unit(unit) => &unit.span,
            Component::Number { span, .. } => span,
        }
    }
}

/// A unit symbol with its optional prefix and explicit exponent
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleUnit {
    pub prefix: Option<String>,
    pub symbol: String,
    pub class: UnitClass,
    /// `None` when the expression wrote no exponent
    pub exponent: Option<i32>,
    pub span: Span,
}

impl fmt::Display for SimpleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{}", prefix)?;
        }
        write!(f, "{}", self.symbol)?;
        if let Some(exponent) = self.exponent {
            write!(f, "{}", exponent)?;
        }
        Ok(())
    }
}
