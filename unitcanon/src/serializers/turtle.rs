//! Turtle writer
//!
//! Each record becomes one `owl:NamedIndividual` block whose subject is the
//! percent-encoded canonical code under the `unit:` namespace.

use super::NAMESPACES;
use crate::UnitRecord;
use std::collections::HashSet;
use std::fmt::Write;

/// Language tag of labels and definitions
pub const LABEL_LANGUAGE: &str = "en";

/// `@prefix` lines and the definition property declaration
pub fn document_header() -> String {
    let mut out = String::new();
    for namespace in NAMESPACES {
        let _ = writeln!(out, "@prefix {}: <{}> .", namespace.prefix, namespace.iri);
    }
    out.push('\n');
    out.push_str("IAO:0000115 a rdf:Property ;\n");
    out.push_str("\trdfs:label \"definition\" .\n");
    out.push('\n');
    out
}

pub fn record_to_turtle(record: &UnitRecord) -> String {
    let mut lines = vec!["a owl:NamedIndividual".to_string()];

    if let Some(label) = &record.label {
        lines.push(format!(
            "rdfs:label \"{}\"@{}",
            escape(label),
            LABEL_LANGUAGE
        ));
    }
    if let Some(definition) = &record.definition {
        lines.push(format!(
            "IAO:0000115 \"{}\"@{}",
            escape(definition),
            LABEL_LANGUAGE
        ));
    }
    if let Some(si_code) = &record.si_code {
        lines.push(format!("unit:SI_code \"{}\"", escape(si_code)));
    }
    lines.push(format!("unit:ucum_code \"{}\"", escape(&record.ucum_code)));
    for identifier in record.identifiers() {
        lines.push(format!("skos:exactMatch {}", compact(identifier)));
    }

    let mut out = format!("unit:{}\n", urlencoding::encode(&record.ucum_code));
    let last = lines.len() - 1;
    for (i, line) in lines.iter().enumerate() {
        let terminator = if i == last { " ." } else { " ;" };
        let _ = writeln!(out, "  {}{}", line, terminator);
    }
    out
}

/// A full document: header followed by one block per distinct canonical code
///
/// Records sharing a code describe the same subject, so only the first of
/// them is written.
pub fn to_turtle(records: &[UnitRecord]) -> String {
    let mut out = document_header();
    let mut written = HashSet::new();
    for record in records {
        if !written.insert(record.ucum_code.as_str()) {
            continue;
        }
        out.push_str(&record_to_turtle(record));
        out.push('\n');
    }
    out
}

/// CURIE for identifiers under a known vocabulary namespace, `<iri>` otherwise
fn compact(identifier: &str) -> String {
    NAMESPACES
        .iter()
        .filter(|namespace| namespace.compacts_identifiers)
        .find_map(|namespace| {
            let local = identifier.strip_prefix(namespace.iri)?;
            let local = local.strip_suffix('/').unwrap_or(local);
            if local.is_empty() {
                None
            } else {
                Some(format!("{}:{}", namespace.prefix, local))
            }
        })
        .unwrap_or_else(|| format!("<{}>", identifier))
}

fn escape(literal: &str) -> String {
    literal.replace('\\', "\\\\").replace('"', "\\\"")
}
