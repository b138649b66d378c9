//! Core Data Model
//!
//! Types used throughout the dashboard:
//! - `Row`: one dated financial observation
//! - `Dataset`: an ordered, immutable sequence of rows
//! - `DateRange`: an inclusive [start, end] filter bound
//!
//! Loading lives in [`source`], range filtering in [`range`].

pub mod range;
pub mod source;

pub use range::DateRange;
pub use source::DataSource;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// One time-series observation from the data source.
///
/// The source's `First of the Year` column is validated during load but not
/// carried here; nothing downstream consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    /// Observation date
    pub date: NaiveDate,
    /// Goal EBITDA for this date
    pub goal: f64,
    /// Actual annualized EBITDA for this date
    pub annualized_ebitda: f64,
}

impl Row {
    /// Create a new row
    pub fn new(date: NaiveDate, goal: f64, annualized_ebitda: f64) -> Self {
        Self {
            date,
            goal,
            annualized_ebitda,
        }
    }
}

/// An ordered sequence of rows, loaded fresh from the source per request.
///
/// Row order is insertion order from the source file. Datasets are never
/// mutated after construction; filtering produces a new Dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from rows, preserving their order
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Create an empty dataset
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// The rows as a slice, in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Keep only rows whose date falls inside `range` (inclusive bounds),
    /// preserving source order.
    ///
    /// An inverted range (start after end) selects nothing; that is the
    /// accepted edge-case policy, not an error.
    pub fn filter_by_range(&self, range: &DateRange) -> Dataset {
        Dataset {
            rows: self
                .rows
                .iter()
                .filter(|row| range.contains(row.date))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Errors raised by the data loader
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The source file could not be read or parsed as CSV
    #[error("failed to read data source {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is missing from the header row
    #[error("data source is missing required column {0:?}")]
    MissingColumn(&'static str),

    /// A date cell could not be parsed with any accepted format
    #[error("line {line}: could not parse {column:?} value {value:?} as a date")]
    InvalidDate {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// A numeric cell could not be parsed
    #[error("line {line}: could not parse {column:?} value {value:?} as a number")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// A row is shorter than the header
    #[error("line {line}: missing value for column {column:?}")]
    MissingValue { line: usize, column: &'static str },
}

/// Result type for data source operations
pub type DataResult<T> = Result<T, DataSourceError>;
