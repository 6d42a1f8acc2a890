//! Output formats for canonical unit records

pub mod turtle;

pub use turtle::{document_header, record_to_turtle, to_turtle};

use crate::{CanonError, CanonResult, UnitRecord};

/// A Turtle prefix and the IRI it abbreviates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: &'static str,
    pub iri: &'static str,
    /// Whether external identifiers under this IRI are written as CURIEs
    pub compacts_identifiers: bool,
}

const fn namespace(prefix: &'static str, iri: &'static str, compacts: bool) -> Namespace {
    Namespace {
        prefix,
        iri,
        compacts_identifiers: compacts,
    }
}

/// Namespaces declared at the top of every Turtle document, in output order
pub const NAMESPACES: &[Namespace] = &[
    namespace("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#", false),
    namespace("rdfs", "http://www.w3.org/2000/01/rdf-schema#", false),
    namespace("xsd", "http://www.w3.org/2001/XMLSchema#", false),
    namespace("owl", "http://www.w3.org/2002/07/owl#", false),
    namespace("IAO", "http://purl.obolibrary.org/obo/IAO_", false),
    namespace("unit", "https://w3id.org/units/", false),
    namespace("UO", "http://purl.obolibrary.org/obo/UO_", true),
    namespace(
        "OM",
        "http://www.ontology-of-units-of-measure.org/resource/om-2/",
        true,
    ),
    namespace("QUDT", "http://qudt.org/vocab/unit/", true),
    namespace(
        "OBOE",
        "http://ecoinformatics.org/oboe/oboe.1.2/oboe-standards.owl#",
        true,
    ),
    namespace(
        "NERC_P06",
        "http://vocab.nerc.ac.uk/collection/P06/current/",
        true,
    ),
    namespace("skos", "http://www.w3.org/2004/02/skos/core#", false),
];

/// Serialize records as a pretty-printed JSON array
pub fn to_json(records: &[UnitRecord]) -> CanonResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| CanonError::Engine(format!("Failed to serialize records: {}", e)))
}
