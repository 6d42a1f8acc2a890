use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use unitcanon::{BatchOutcome, UnitFactor, UnitRecord, VocabularyMatch};

const MISSING: &str = "?";

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Canonical strings, factor table and cross-references of one record
    pub fn format_record(&self, record: &UnitRecord) -> String {
        let mut output = String::new();
        output.push_str(&self.format_summary_table(record));
        output.push('\n');
        output.push_str(&self.format_factors_table(&record.factors));
        output.push('\n');
        output.push_str(&self.format_matches(&record.matches));
        output
    }

    fn format_summary_table(&self, record: &UnitRecord) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Field").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Left),
        ]));

        let rows = [
            ("input", Some(record.input.as_str())),
            ("ucum_code", Some(record.ucum_code.as_str())),
            ("si_code", record.si_code.as_deref()),
            ("label", record.label.as_deref()),
            ("definition", record.definition.as_deref()),
        ];
        for (field, value) in rows {
            table.add_row(Row::from(vec![field, value.unwrap_or(MISSING)]));
        }

        table.to_string()
    }

    fn format_factors_table(&self, factors: &[UnitFactor]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Prefix"),
            Cell::new("Symbol"),
            Cell::new("Class"),
            Cell::new("Exponent").set_alignment(CellAlignment::Right),
            Cell::new("SI code"),
            Cell::new("Label"),
        ]));

        for factor in factors {
            table.add_row(Row::from(vec![
                Cell::new(&factor.prefix),
                Cell::new(&factor.symbol),
                Cell::new(factor.class),
                Cell::new(factor.exponent).set_alignment(CellAlignment::Right),
                Cell::new(factor.si_code.as_deref().unwrap_or(MISSING)),
                Cell::new(factor.label.as_deref().unwrap_or(MISSING)),
            ]));
        }

        table.to_string()
    }

    fn format_matches(&self, matches: &[VocabularyMatch]) -> String {
        let mut output = String::new();
        for (i, vocabulary_match) in matches.iter().enumerate() {
            let branch = if i + 1 == matches.len() { "└─" } else { "├─" };
            let identifiers = if vocabulary_match.identifiers.is_empty() {
                "-".to_string()
            } else {
                vocabulary_match.identifiers.join(", ")
            };
            output.push_str(&format!(
                "{} {}: {}\n",
                branch, vocabulary_match.vocabulary, identifiers
            ));
        }
        output
    }

    /// One line per record, then the record and rejection counts
    pub fn format_batch_summary(&self, outcome: &BatchOutcome) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Input"),
            Cell::new("Code"),
            Cell::new("Label"),
            Cell::new("Links").set_alignment(CellAlignment::Right),
        ]));

        for record in &outcome.records {
            table.add_row(Row::from(vec![
                Cell::new(&record.input),
                Cell::new(&record.ucum_code),
                Cell::new(record.label.as_deref().unwrap_or(MISSING)),
                Cell::new(record.identifiers().count()).set_alignment(CellAlignment::Right),
            ]));
        }

        format!(
            "{}\n{} record(s), {} rejected\n",
            table,
            outcome.records.len(),
            outcome.rejected.len()
        )
    }
}
