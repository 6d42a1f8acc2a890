use crate::assembler;
use crate::generator;
use crate::matcher::Matcher;
use crate::normalizer;
use crate::parser::parse;
use crate::response::{BatchOutcome, Rejection, UnitRecord};
use crate::semantic::ParsedExpression;
use crate::tables::{LookupTables, Vocabulary};
use crate::{CanonError, CanonResult, ResourceLimits};
use tracing::{debug, warn};

/// The unit canonicalization engine.
///
/// Holds the read-only lookup tables and the vocabulary index. Every call
/// processes one expression from scratch, so a single engine can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct Engine {
    tables: LookupTables,
    matcher: Matcher,
    limits: ResourceLimits,
}

impl Engine {
    pub fn new(tables: LookupTables, vocabularies: &[Vocabulary]) -> Self {
        Self {
            tables,
            matcher: Matcher::new(vocabularies),
            limits: ResourceLimits::default(),
        }
    }

    /// Engine over the tables and vocabularies embedded in the crate
    pub fn builtin() -> CanonResult<Self> {
        Ok(Self::new(LookupTables::builtin()?, &Vocabulary::builtin()?))
    }

    /// Replace the resource limits
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn vocabulary_names(&self) -> &[String] {
        self.matcher.vocabulary_names()
    }

    /// Parse, normalize and enrich one expression, factors in parse order
    pub fn parse_expression(&self, input: &str) -> CanonResult<ParsedExpression> {
        let input = input.trim();
        if input.len() > self.limits.max_input_bytes {
            return Err(CanonError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: self.limits.max_input_bytes.to_string(),
                actual_value: input.len().to_string(),
                suggestion: format!(
                    "Shorten the unit expression to {} bytes or less",
                    self.limits.max_input_bytes
                ),
            });
        }

        let tree = parse(input)?;
        let factor_count = tree.term.component_count();
        if factor_count > self.limits.max_factors {
            return Err(CanonError::ResourceLimitExceeded {
                limit_name: "max_factors".to_string(),
                limit_value: self.limits.max_factors.to_string(),
                actual_value: factor_count.to_string(),
                suggestion: format!(
                    "Split the expression into at most {} factors",
                    self.limits.max_factors
                ),
            });
        }

        let mut expression = normalizer::normalize(&tree, input)?;
        generator::enrich(&mut expression, &self.tables);
        debug!(input, factors = expression.len(), "normalized expression");
        Ok(expression)
    }

    /// Canonicalize one expression.
    ///
    /// Fails with [`CanonError::Empty`] when the expression parses but has no
    /// label, no definition and no external identifier.
    pub fn canonicalize(&self, input: &str) -> CanonResult<UnitRecord> {
        let expression = self.parse_expression(input)?;
        let record = self.record(&expression);
        if !record.has_content() {
            return Err(CanonError::Empty(record.input));
        }
        Ok(record)
    }

    /// Build the output record of an already normalized expression
    pub fn record(&self, expression: &ParsedExpression) -> UnitRecord {
        let canonical = assembler::assemble(expression, &self.tables);
        let split = assembler::split(expression);
        let factors = split.factors().cloned().collect();
        let matches = self.matcher.resolve(expression);

        UnitRecord {
            input: expression.source.clone(),
            ucum_code: canonical.ucum_code,
            si_code: canonical.si_code,
            label: canonical.label,
            definition: canonical.definition,
            factors,
            matches,
        }
    }

    /// Canonicalize every input in order.
    ///
    /// Each input is processed on its own and yields one record when it
    /// succeeds. Failing inputs are reported in `rejected` and never stop the
    /// batch.
    pub fn process_batch<I, S>(&self, inputs: I) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = BatchOutcome::default();

        for input in inputs {
            let input = input.as_ref();
            match self.canonicalize(input) {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    warn!(input, error = %error, "skipping unit expression");
                    outcome.rejected.push(Rejection {
                        input: input.to_string(),
                        error,
                    });
                }
            }
        }

        debug!(
            records = outcome.records.len(),
            rejected = outcome.rejected.len(),
            "batch processed"
        );
        outcome
    }
}
