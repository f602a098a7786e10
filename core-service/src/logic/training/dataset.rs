//! Training Dataset - comma-separated fire records
//!
//! Columns are located by header name, so extra columns and any column
//! order are fine. `month` and `day` accept either abbreviations
//! (`mar`, `fri`) or already-encoded integer codes.
//!
//! Fields are split on every comma. Surrounding quotes are stripped but
//! quoting does not protect an embedded comma, so `"a,b"` counts as two
//! fields and the row is rejected for having the wrong width.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::logic::features::calendar::{encode_day, encode_month, DAY_CODES, MONTH_CODES};
use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::error::DatasetError;

/// Column holding the burned area in hectares
pub const AREA_COLUMN: &str = "area";

/// One labeled row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRecord {
    /// Values in `FEATURE_LAYOUT` order
    pub features: [f64; FEATURE_COUNT],
    pub area: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<FireRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<FireRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::parse(&text)?;
        log::info!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn parse(text: &str) -> Result<Self, DatasetError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(DatasetError::MissingHeader)?;
        let header: Vec<String> = split_fields(header).map(str::to_string).collect();

        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let column = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let mut feature_columns = [0usize; FEATURE_COUNT];
        for (slot, name) in feature_columns.iter_mut().zip(FEATURE_LAYOUT.iter()) {
            *slot = column(name)?;
        }
        let area_column = column(AREA_COLUMN)?;

        let mut records = Vec::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = split_fields(line).collect();
            if fields.len() != header.len() {
                return Err(DatasetError::ShortRow {
                    line: line_no,
                    expected: header.len(),
                    actual: fields.len(),
                });
            }

            let mut features = [0.0; FEATURE_COUNT];
            for (i, (&col, name)) in feature_columns.iter().zip(FEATURE_LAYOUT.iter()).enumerate() {
                features[i] = parse_feature(name, fields[col], line_no)?;
            }
            let area = parse_number(AREA_COLUMN, fields[area_column], line_no)?;

            records.push(FireRecord { features, area });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[FireRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn features(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.records.iter().map(|r| r.features).collect()
    }

    pub fn areas(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.area).collect()
    }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|s| s.trim().trim_matches('"'))
}

fn invalid(column: &str, value: &str, line: usize) -> DatasetError {
    DatasetError::InvalidValue {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_number(column: &str, value: &str, line: usize) -> Result<f64, DatasetError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(column, value, line))
}

/// Calendar columns: name first, then a pre-encoded integer code
fn parse_calendar(
    column: &str,
    value: &str,
    line: usize,
    encode: fn(&str) -> Option<u8>,
    n_codes: usize,
) -> Result<f64, DatasetError> {
    if let Some(code) = encode(value) {
        return Ok(code as f64);
    }
    match value.parse::<u8>() {
        Ok(code) if (code as usize) < n_codes => Ok(code as f64),
        _ => Err(invalid(column, value, line)),
    }
}

fn parse_feature(column: &str, value: &str, line: usize) -> Result<f64, DatasetError> {
    match column {
        "month" => parse_calendar(column, value, line, encode_month, MONTH_CODES.len()),
        "day" => parse_calendar(column, value, line, encode_day, DAY_CODES.len()),
        _ => parse_number(column, value, line),
    }
}
