//! Cross-reference matcher - resolves an expression against external vocabularies
//!
//! External tables record a unit under whatever spelling their authors chose
//! (`m.s-1`, `s-1.m`, `m/s`). Every order-equivalent spelling of an expression
//! is generated and looked up in an index built once from the vocabularies.

use crate::response::VocabularyMatch;
use crate::semantic::{with_exponent, ParsedExpression, UnitFactor};
use crate::tables::Vocabulary;
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    vocabularies: Vec<String>,
    /// spelling -> (vocabulary index, identifier)
    index: HashMap<String, Vec<(usize, String)>>,
}

impl Matcher {
    pub fn new(vocabularies: &[Vocabulary]) -> Self {
        let mut index: HashMap<String, Vec<(usize, String)>> = HashMap::new();
        for (position, vocabulary) in vocabularies.iter().enumerate() {
            for entry in &vocabulary.entries {
                for spelling in &entry.spellings {
                    index
                        .entry(spelling.clone())
                        .or_default()
                        .push((position, entry.identifier.clone()));
                }
            }
        }
        Self {
            vocabularies: vocabularies.iter().map(|v| v.name.clone()).collect(),
            index,
        }
    }

    pub fn vocabulary_names(&self) -> &[String] {
        &self.vocabularies
    }

    /// Vocabulary name and identifier of every concept recorded under `spelling`
    pub fn lookup(&self, spelling: &str) -> Vec<(&str, &str)> {
        self.index
            .get(spelling)
            .map(|hits| {
                hits.iter()
                    .map(|(position, identifier)| {
                        (self.vocabularies[*position].as_str(), identifier.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One match per registered vocabulary, in registration order
    pub fn resolve(&self, expression: &ParsedExpression) -> Vec<VocabularyMatch> {
        let mut matches: Vec<VocabularyMatch> = self
            .vocabularies
            .iter()
            .map(|name| VocabularyMatch::new(name.clone()))
            .collect();
        let mut seen: HashSet<(usize, &str)> = HashSet::new();

        for candidate in candidate_spellings(expression) {
            let Some(hits) = self.index.get(&candidate) else {
                continue;
            };
            for (position, identifier) in hits {
                if seen.insert((*position, identifier.as_str())) {
                    trace!(candidate = %candidate, identifier = %identifier, "matched");
                    matches[*position].identifiers.push(identifier.clone());
                }
            }
        }

        matches
    }
}

/// Every order-equivalent spelling of an expression, without duplicates
///
/// Dot forms permute all factors with signed exponents (`m.s-1`, `s-1.m`).
/// Slash forms permute the numerator, then write each denominator factor as
/// `/code` with its absolute exponent (`m/s`, `kg/m/s2`, `/s`).
pub fn candidate_spellings(expression: &ParsedExpression) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut push = |candidate: String| {
        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    };

    let all: Vec<String> = expression
        .factors
        .iter()
        .map(UnitFactor::code_with_exponent)
        .collect();
    for ordering in permutations(&all) {
        push(ordering.join("."));
    }

    let (numerator, denominator): (Vec<&UnitFactor>, Vec<&UnitFactor>) = expression
        .factors
        .iter()
        .partition(|factor| !factor.is_denominator());
    if denominator.is_empty() {
        return candidates;
    }

    let numerator: Vec<String> = numerator
        .iter()
        .map(|factor| factor.code_with_exponent())
        .collect();
    let denominator: Vec<String> = denominator
        .iter()
        .map(|factor| {
            let exponent = factor.exponent.unsigned_abs() as i32;
            format!("/{}", with_exponent(&factor.code(), exponent))
        })
        .collect();

    let denominator_orderings = permutations(&denominator);
    for numerator_ordering in permutations(&numerator) {
        let head = numerator_ordering.join(".");
        for denominator_ordering in &denominator_orderings {
            push(format!("{}{}", head, denominator_ordering.concat()));
        }
    }

    candidates
}

/// All orderings of `items`; a single empty ordering for an empty slice
fn permutations(items: &[String]) -> Vec<Vec<String>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut orderings = Vec::new();
    for (i, first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first.clone());
            orderings.push(tail);
        }
    }
    orderings
}
