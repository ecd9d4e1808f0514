//! Category density table
//!
//! Grams-per-milliliter estimates keyed by food category, loaded once from a
//! `category,min,max` CSV and read-only afterwards.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Water-equivalent density used when nothing better is known
pub const NEUTRAL_DENSITY: f64 = 1.0;

/// Density load error types
#[derive(Debug, Error)]
pub enum DensityError {
    #[error("Failed to read density dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Density dataset is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("Malformed density row at line {line}: {column} = '{value}' is not a number")]
    MalformedRow {
        line: u64,
        column: &'static str,
        value: String,
    },
}

pub type DensityResult<T> = Result<T, DensityError>;

/// Density bounds for one category, in g/mL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEntry {
    pub category: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl DensityEntry {
    /// Fill in missing bounds: both absent is neutral, one absent copies the other
    pub fn from_bounds(category: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        let (avg, min, max) = match (min, max) {
            (Some(min), Some(max)) => ((min + max) / 2.0, min, max),
            (None, None) => (NEUTRAL_DENSITY, NEUTRAL_DENSITY, NEUTRAL_DENSITY),
            (None, Some(max)) => (max, max, max),
            (Some(min), None) => (min, min, min),
        };
        Self {
            category: category.into(),
            avg,
            min,
            max,
        }
    }
}

/// Category -> density lookup
#[derive(Debug, Clone, Default)]
pub struct DensityTable {
    entries: HashMap<String, DensityEntry>,
}

impl DensityTable {
    /// Load the table from a CSV file
    pub fn load_path<P: AsRef<Path>>(path: P) -> DensityResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::load_csv(reader)
    }

    /// Load the table from any CSV source
    pub fn from_reader<R: Read>(source: R) -> DensityResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self::load_csv(reader)
    }

    fn load_csv<R: Read>(mut reader: csv::Reader<R>) -> DensityResult<Self> {
        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(DensityError::MissingColumn(name))
        };
        let category_col = column("category")?;
        let min_col = column("min")?;
        let max_col = column("max")?;

        let mut entries = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let category = record.get(category_col).unwrap_or("");
            if category.is_empty() {
                tracing::warn!("Skipping density row without a category at line {}", line);
                continue;
            }

            let min = parse_bound(record.get(min_col), "min", line)?;
            let max = parse_bound(record.get(max_col), "max", line)?;

            let entry = DensityEntry::from_bounds(category, min, max);
            entries.insert(entry.category.clone(), entry);
        }

        tracing::info!("Loaded {} density categories", entries.len());
        Ok(Self { entries })
    }

    /// Build a table from entries directly
    pub fn from_entries<I: IntoIterator<Item = DensityEntry>>(entries: I) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.category.clone(), e))
                .collect(),
        }
    }

    /// Average density for a category, if the category is known
    pub fn query(&self, category: &str) -> Option<f64> {
        self.entries.get(category).map(|e| e.avg)
    }

    /// Average density for an optional category, neutral when unknown
    pub fn density_for(&self, category: Option<&str>) -> f64 {
        category
            .and_then(|c| self.query(c))
            .unwrap_or(NEUTRAL_DENSITY)
    }

    pub fn get(&self, category: &str) -> Option<&DensityEntry> {
        self.entries.get(category)
    }

    /// All entries, sorted by category name
    pub fn entries(&self) -> Vec<&DensityEntry> {
        let mut list: Vec<&DensityEntry> = self.entries.values().collect();
        list.sort_by(|a, b| a.category.cmp(&b.category));
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_bound(raw: Option<&str>, column: &'static str, line: u64) -> DensityResult<Option<f64>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| DensityError::MalformedRow {
                line,
                column,
                value: value.to_string(),
            }),
    }
}
