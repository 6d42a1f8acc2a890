//! Lookup tables - read-only symbol, prefix, exponent and vocabulary data
//!
//! Tables are loaded once from CSV (or from the copies embedded in the crate)
//! and never mutated while expressions are processed.

use crate::error::CanonError;
use crate::CanonResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const BUILTIN_UNITS: &str = include_str!("../data/units.csv");
const BUILTIN_PREFIXES: &str = include_str!("../data/prefixes.csv");
const BUILTIN_EXPONENTS: &str = include_str!("../data/exponents.csv");
const BUILTIN_VOCABULARIES: &[(&str, &str)] = &[
    ("om", include_str!("../data/mappings/om.csv")),
    ("qudt", include_str!("../data/mappings/qudt.csv")),
    ("uo", include_str!("../data/mappings/uo.csv")),
    ("oboe", include_str!("../data/mappings/oboe.csv")),
    ("nerc_p06", include_str!("../data/mappings/nerc_p06.csv")),
];

/// A unit symbol's display data
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    /// Symbol as written in the SI brochure, absent for non-SI units
    pub si_symbol: Option<String>,
    pub label: String,
    pub definition: Option<String>,
}

impl UnitEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            si_symbol: None,
            label: label.into(),
            definition: None,
        }
    }

    pub fn with_si_symbol(mut self, si_symbol: impl Into<String>) -> Self {
        self.si_symbol = Some(si_symbol.into());
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }
}

/// A metric prefix's display data
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixEntry {
    pub label: String,
    /// Power of ten the prefix stands for (`k` is 3)
    pub magnitude: i32,
    /// SI spelling when it differs from the UCUM one (`u` is `μ`)
    pub si_symbol: Option<String>,
}

impl PrefixEntry {
    pub fn new(label: impl Into<String>, magnitude: i32) -> Self {
        Self {
            label: label.into(),
            magnitude,
            si_symbol: None,
        }
    }

    pub fn with_si_symbol(mut self, si_symbol: impl Into<String>) -> Self {
        self.si_symbol = Some(si_symbol.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct UnitRow {
    #[serde(rename = "UCUM_symbol")]
    ucum_symbol: String,
    #[serde(rename = "SI_symbol", default)]
    si_symbol: String,
    label_en: String,
    #[serde(default)]
    definition_en: String,
}

#[derive(Debug, Deserialize)]
struct PrefixRow {
    symbol: String,
    label_en: String,
    prefix_num: String,
    #[serde(rename = "SI_symbol", default)]
    si_symbol: String,
}

#[derive(Debug, Deserialize)]
struct ExponentRow {
    power: String,
    label_en: String,
}

/// Unit, prefix and exponent tables used to build codes, labels and definitions
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    units: HashMap<String, UnitEntry>,
    prefixes: HashMap<String, PrefixEntry>,
    exponents: HashMap<u32, String>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables embedded in the crate
    pub fn builtin() -> CanonResult<Self> {
        Self::from_readers(
            BUILTIN_UNITS.as_bytes(),
            BUILTIN_PREFIXES.as_bytes(),
            BUILTIN_EXPONENTS.as_bytes(),
        )
    }

    pub fn from_readers(
        units: impl Read,
        prefixes: impl Read,
        exponents: impl Read,
    ) -> CanonResult<Self> {
        let mut tables = Self::new();
        tables.load_units(units)?;
        tables.load_prefixes(prefixes)?;
        tables.load_exponents(exponents)?;
        Ok(tables)
    }

    pub fn from_paths(units: &Path, prefixes: &Path, exponents: &Path) -> CanonResult<Self> {
        Self::from_readers(
            open_table(units)?,
            open_table(prefixes)?,
            open_table(exponents)?,
        )
    }

    pub fn with_unit(mut self, symbol: impl Into<String>, entry: UnitEntry) -> Self {
        self.units.insert(symbol.into(), entry);
        self
    }

    pub fn with_prefix(mut self, symbol: impl Into<String>, entry: PrefixEntry) -> Self {
        self.prefixes.insert(symbol.into(), entry);
        self
    }

    pub fn with_exponent(mut self, power: u32, word: impl Into<String>) -> Self {
        self.exponents.insert(power, word.into());
        self
    }

    /// Load a units table (`UCUM_symbol, SI_symbol, label_en, definition_en`)
    pub fn load_units(&mut self, reader: impl Read) -> CanonResult<usize> {
        let mut count = 0;
        for row in csv_reader(reader).deserialize::<UnitRow>() {
            let row = row?;
            if row.ucum_symbol.is_empty() {
                continue;
            }
            self.units.insert(
                row.ucum_symbol,
                UnitEntry {
                    si_symbol: non_empty(row.si_symbol),
                    label: row.label_en,
                    definition: non_empty(row.definition_en),
                },
            );
            count += 1;
        }
        debug!(count, "loaded unit table");
        Ok(count)
    }

    /// Load a prefix table (`symbol, label_en, prefix_num[, SI_symbol]`)
    pub fn load_prefixes(&mut self, reader: impl Read) -> CanonResult<usize> {
        let mut count = 0;
        for row in csv_reader(reader).deserialize::<PrefixRow>() {
            let row = row?;
            if row.symbol.is_empty() {
                continue;
            }
            let magnitude = parse_magnitude(&row.prefix_num).ok_or_else(|| {
                CanonError::Table(format!(
                    "prefix '{}' has an invalid prefix_num '{}'",
                    row.symbol, row.prefix_num
                ))
            })?;
            self.prefixes.insert(
                row.symbol,
                PrefixEntry {
                    label: row.label_en,
                    magnitude,
                    si_symbol: non_empty(row.si_symbol),
                },
            );
            count += 1;
        }
        debug!(count, "loaded prefix table");
        Ok(count)
    }

    /// Load an exponent table (`power, label_en`)
    pub fn load_exponents(&mut self, reader: impl Read) -> CanonResult<usize> {
        let mut count = 0;
        for row in csv_reader(reader).deserialize::<ExponentRow>() {
            let row = row?;
            let power = row.power.trim_start_matches('-').parse::<u32>().map_err(|_| {
                CanonError::Table(format!("exponent table has an invalid power '{}'", row.power))
            })?;
            self.exponents.insert(power, row.label_en);
            count += 1;
        }
        debug!(count, "loaded exponent table");
        Ok(count)
    }

    pub fn unit(&self, symbol: &str) -> Option<&UnitEntry> {
        self.units.get(symbol)
    }

    pub fn prefix(&self, symbol: &str) -> Option<&PrefixEntry> {
        self.prefixes.get(symbol)
    }

    /// Ordinal word for the magnitude of an exponent (`-2` and `2` are "square")
    pub fn exponent_word(&self, exponent: i32) -> Option<&str> {
        self.exponents
            .get(&exponent.unsigned_abs())
            .map(String::as_str)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }
}

/// One concept of an external vocabulary and the unit codes it is recorded under
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    pub identifier: String,
    pub spellings: Vec<String>,
}

/// An external vocabulary's identifier-to-code table
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub name: String,
    pub entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry<S: Into<String>>(
        mut self,
        identifier: impl Into<String>,
        spellings: impl IntoIterator<Item = S>,
    ) -> Self {
        self.entries.push(VocabularyEntry {
            identifier: identifier.into(),
            spellings: spellings.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Load a mapping table with an `IRI` column and any number of `UCUM*`
    /// spelling columns.
    pub fn from_reader(name: impl Into<String>, reader: impl Read) -> CanonResult<Self> {
        let name = name.into();
        let mut rdr = csv_reader(reader);
        let headers = rdr.headers()?.clone();

        let identifier_column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("IRI"))
            .ok_or_else(|| {
                CanonError::Table(format!("vocabulary '{}' has no IRI column", name))
            })?;
        let spelling_columns: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.to_ascii_uppercase().starts_with("UCUM"))
            .map(|(i, _)| i)
            .collect();
        if spelling_columns.is_empty() {
            return Err(CanonError::Table(format!(
                "vocabulary '{}' has no UCUM code columns",
                name
            )));
        }

        let mut vocabulary = Self::new(name);
        for record in rdr.records() {
            let record = record?;
            let identifier = match record.get(identifier_column) {
                Some(iri) if !iri.is_empty() => iri.to_string(),
                _ => continue,
            };
            let spellings: Vec<String> = spelling_columns
                .iter()
                .filter_map(|&i| record.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            vocabulary.entries.push(VocabularyEntry {
                identifier,
                spellings,
            });
        }

        debug!(
            vocabulary = %vocabulary.name,
            entries = vocabulary.entries.len(),
            "loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Load a mapping table named after its file stem
    pub fn from_path(path: &Path) -> CanonResult<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CanonError::Table(format!("cannot name vocabulary from '{}'", path.display()))
            })?
            .to_string();
        Self::from_reader(name, open_table(path)?)
    }

    /// Vocabularies embedded in the crate
    pub fn builtin() -> CanonResult<Vec<Self>> {
        BUILTIN_VOCABULARIES
            .iter()
            .map(|(name, content)| Self::from_reader(*name, content.as_bytes()))
            .collect()
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn open_table(path: &Path) -> CanonResult<File> {
    File::open(path)
        .map_err(|e| CanonError::Table(format!("cannot open '{}': {}", path.display(), e)))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Accepts `3`, `-3`, `^3` and `10^3`
fn parse_magnitude(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix("10^")
        .or_else(|| raw.strip_prefix('^'))
        .unwrap_or(raw);
    digits.parse::<i32>().ok()
}
