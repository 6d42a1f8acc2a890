use crate::error::CanonError;
use crate::semantic::UnitFactor;
use serde::{Serialize, Serializer};

/// Identifiers one external vocabulary records for a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyMatch {
    pub vocabulary: String,
    pub identifiers: Vec<String>,
}

impl VocabularyMatch {
    pub fn new(vocabulary: impl Into<String>) -> Self {
        Self {
            vocabulary: vocabulary.into(),
            identifiers: Vec::new(),
        }
    }
}

/// The canonical form of one unit expression
///
/// Produced by `Engine::canonicalize` and consumed by the serializers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRecord {
    /// The expression as given
    pub input: String,
    pub ucum_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Factors in canonical order, numerator first
    pub factors: Vec<UnitFactor>,
    pub matches: Vec<VocabularyMatch>,
}

impl UnitRecord {
    /// True when a label, a definition or at least one external identifier resolved
    pub fn has_content(&self) -> bool {
        self.label.is_some() || self.definition.is_some() || self.identifiers().next().is_some()
    }

    /// Every matched identifier across vocabularies, in vocabulary order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .flat_map(|m| m.identifiers.iter().map(String::as_str))
    }
}

/// An input left out of a batch and the reason
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub input: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: CanonError,
}

/// Result of processing a batch of expressions
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Emitted records, in input order
    pub records: Vec<UnitRecord>,
    pub rejected: Vec<Rejection>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn serialize_display<S: Serializer>(error: &CanonError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
