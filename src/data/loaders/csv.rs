// csv.rs - Delimited family record loader

use crate::data::person::{Family, Person};
use crate::error::{HeredityError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Columns every family record file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

/// Raw row as it appears in the file
#[derive(Debug, Deserialize)]
struct FamilyRecord {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    #[serde(rename = "trait")]
    observed: Option<String>,
}

/// Parse the trait column: "1" = true, "0" = false, empty = unknown
pub fn parse_trait(value: Option<&str>) -> std::result::Result<Option<bool>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) => Err(format!(
            "unrecognized trait value '{}' (expected 1, 0 or empty)",
            other
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read person records from any delimited source with a `name,mother,father,trait` header
pub fn read_records<R: Read>(reader: R, delimiter: u8, source: &str) -> Result<Vec<Person>> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| HeredityError::Csv {
            path: source.to_string(),
            source: e,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(HeredityError::Input(format!(
                "'{}' is missing required column '{}' (header must be {})",
                source,
                column,
                REQUIRED_COLUMNS.join(",")
            )));
        }
    }

    let mut persons = Vec::new();
    for (row_num, row) in csv_reader.deserialize::<FamilyRecord>().enumerate() {
        let record = row.map_err(|e| HeredityError::Csv {
            path: source.to_string(),
            source: e,
        })?;

        let observed_trait = parse_trait(record.observed.as_deref()).map_err(|e| {
            HeredityError::Input(format!("'{}' line {}: {}", source, row_num + 2, e))
        })?;

        persons.push(Person {
            name: record.name,
            mother: non_empty(record.mother),
            father: non_empty(record.father),
            observed_trait,
        });
    }

    Ok(persons)
}

impl Family {
    /// Load a comma-separated family file
    pub fn from_csv(file_path: &Path) -> Result<Self> {
        Self::from_delimited(file_path, b',')
    }

    pub(crate) fn from_delimited(file_path: &Path, delimiter: u8) -> Result<Self> {
        let file = std::fs::File::open(file_path).map_err(|e| {
            HeredityError::io(
                format!("Failed to open family file '{}'", file_path.display()),
                e,
            )
        })?;

        let source = file_path.display().to_string();
        let persons = read_records(file, delimiter, &source)?;
        let family = Family::new(persons)?;

        eprintln!(
            "✅ Family loaded: {} persons ({} with observed trait)",
            family.len(),
            family.observed_count()
        );
        Ok(family)
    }
}
