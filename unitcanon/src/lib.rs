//! # unitcanon
//!
//! **One canonical name for every way of writing a unit**
//!
//! unitcanon parses unit-of-measure expressions written in UCUM / SI brochure
//! notation (`m.s-1`, `/g`, `kPa`, `[degF]`) and derives a canonical code, an
//! SI code, an English label and definition, and the identifiers external
//! vocabularies (QUDT, OM, UO, ...) use for the same unit.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unitcanon::{CanonResult, Engine};
//!
//! fn main() -> CanonResult<()> {
//!     let engine = Engine::builtin()?;
//!
//!     let record = engine.canonicalize("s-1.m")?;
//!     assert_eq!(record.ucum_code, "m.s-1");
//!     assert_eq!(record.label.as_deref(), Some("metre per second"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. `parser` - pest grammar, ordered symbol classes, left-associative chains
//! 2. `normalizer` - operators and implicit exponents become signed exponents
//! 3. `generator` - per-factor codes and labels from the lookup tables
//! 4. `assembler` - numerator/denominator split, canonical order, strings
//! 5. `matcher` - order-equivalent spellings resolved against vocabularies

pub mod assembler;
pub mod ast;
pub mod engine;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod normalizer;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod semantic;
pub mod serializers;
pub mod tables;

pub use assembler::{Canonical, KILOGRAM_DEFINITION};
pub use ast::{Span, UnitClass, UnitExpr};
pub use engine::Engine;
pub use error::{CanonError, ErrorDetails};
pub use matcher::{candidate_spellings, Matcher};
pub use parser::parse;
pub use resource_limits::ResourceLimits;
pub use response::{BatchOutcome, Rejection, UnitRecord, VocabularyMatch};
pub use semantic::{ParsedExpression, UnitFactor};
pub use tables::{LookupTables, PrefixEntry, UnitEntry, Vocabulary, VocabularyEntry};

/// Result type for unitcanon operations
pub type CanonResult<T> = Result<T, CanonError>;

#[cfg(test)]
mod tests;
