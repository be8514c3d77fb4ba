//! Ingredient seed records and seed-file parsing
//!
//! Reference data for the `ingredients` table ships as either a JSON array
//! of `{name, measurement_unit}` objects or a CSV file of
//! `name,measurement_unit` rows. Parsing is tolerant at the record level:
//! entries with missing or invalid fields are skipped and counted rather
//! than failing the whole import. A file that is not parseable at all is an
//! error.

use crate::errors::SeedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use validator::Validate;

/// Maximum length of an ingredient name
pub const MAX_INGREDIENT_NAME_LEN: u64 = 128;
/// Maximum length of a measurement unit
pub const MAX_MEASUREMENT_UNIT_LEN: u64 = 64;

/// Supported seed-file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedFormat {
    Json,
    Csv,
}

impl SeedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedFormat::Json => "json",
            SeedFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for SeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SeedFormat::Json),
            "csv" => Ok(SeedFormat::Csv),
            other => Err(format!("unsupported seed format: {other}")),
        }
    }
}

/// An ingredient record ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewIngredient {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
        }
    }
}

/// The result of parsing a seed file
#[derive(Debug, Default)]
pub struct SeedBatch {
    /// Records that passed validation
    pub records: Vec<NewIngredient>,
    /// Records dropped for missing or invalid fields
    pub skipped: usize,
}

/// Raw JSON entry before validation; both fields optional so that a single
/// incomplete object does not abort the whole file
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    measurement_unit: Option<String>,
}

/// Parse a JSON seed document: a top-level array of
/// `{"name": ..., "measurement_unit": ...}` objects
pub fn parse_json(input: &str) -> Result<SeedBatch, SeedError> {
    let raw: Vec<RawRecord> = serde_json::from_str(input)?;

    let mut batch = SeedBatch::default();
    for item in raw {
        match (item.name, item.measurement_unit) {
            (Some(name), Some(unit)) => push_validated(&mut batch, name, unit),
            _ => batch.skipped += 1,
        }
    }
    Ok(batch)
}

/// Parse a CSV seed document of `name,measurement_unit` rows
///
/// A leading header row (`name,measurement_unit`) is tolerated and skipped;
/// rows with fewer than two fields are skipped.
pub fn parse_csv(input: &str) -> Result<SeedBatch, SeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut batch = SeedBatch::default();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if index == 0 && looks_like_header(&row) {
            continue;
        }
        match (row.get(0), row.get(1)) {
            (Some(name), Some(unit)) => {
                push_validated(&mut batch, name.to_string(), unit.to_string())
            }
            _ => batch.skipped += 1,
        }
    }
    Ok(batch)
}

/// Read and parse a seed file in the given format
pub fn parse_seed_file(path: &Path, format: SeedFormat) -> Result<SeedBatch, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SeedError::FileNotFound(path.to_path_buf())
        } else {
            SeedError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    match format {
        SeedFormat::Json => parse_json(&contents),
        SeedFormat::Csv => parse_csv(&contents),
    }
}

fn push_validated(batch: &mut SeedBatch, name: String, measurement_unit: String) {
    let record = NewIngredient {
        name,
        measurement_unit,
    };
    if record.validate().is_ok() {
        batch.records.push(record);
    } else {
        batch.skipped += 1;
    }
}

fn looks_like_header(row: &csv::StringRecord) -> bool {
    matches!(
        (row.get(0), row.get(1)),
        (Some(first), Some(second))
            if first.trim().eq_ignore_ascii_case("name")
                && second.trim().eq_ignore_ascii_case("measurement_unit")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_array() {
        let input = r#"[
            {"name": "flour", "measurement_unit": "g"},
            {"name": "milk", "measurement_unit": "ml"}
        ]"#;
        let batch = parse_json(input).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.records[0], NewIngredient::new("flour", "g"));
    }

    #[test]
    fn json_skips_incomplete_records() {
        let input = r#"[
            {"name": "flour", "measurement_unit": "g"},
            {"name": "mystery"},
            {"measurement_unit": "ml"},
            {}
        ]"#;
        let batch = parse_json(input).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn json_skips_invalid_field_lengths() {
        let long_name = "x".repeat(129);
        let input = format!(
            r#"[{{"name": "{long_name}", "measurement_unit": "g"}},
                {{"name": "salt", "measurement_unit": ""}}]"#
        );
        let batch = parse_json(&input).unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.skipped, 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_json("{not json"),
            Err(SeedError::Json(_))
        ));
    }

    #[test]
    fn parses_headerless_csv() {
        let batch = parse_csv("flour,g\nmilk,ml\n").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn csv_header_row_is_skipped() {
        let batch = parse_csv("name,measurement_unit\nflour,g\n").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name, "flour");
    }

    #[test]
    fn csv_short_rows_are_skipped() {
        let batch = parse_csv("flour,g\nonlyonefield\nmilk,ml\n").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn csv_extra_columns_are_ignored() {
        let batch = parse_csv("flour,g,extra\n").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0], NewIngredient::new("flour", "g"));
    }

    #[test]
    fn seed_format_round_trips_from_str() {
        assert_eq!("json".parse::<SeedFormat>().unwrap(), SeedFormat::Json);
        assert_eq!("CSV".parse::<SeedFormat>().unwrap(), SeedFormat::Csv);
        assert!("yaml".parse::<SeedFormat>().is_err());
    }
}
