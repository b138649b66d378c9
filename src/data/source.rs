//! Data Loader
//!
//! Read-through accessor over the CSV data source. There is deliberately no
//! caching: every `load()` re-reads and re-parses the full file, so a change
//! to the backing file is visible on the next request without any
//! invalidation concern.
//!
//! Columns are located by header name, so column order in the file does not
//! matter. Dates are parsed with a configured primary format first, then a
//! short list of common fallbacks.

use super::{DataResult, DataSourceError, Dataset, Row};
use chrono::NaiveDate;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Required column headers in the source file.
const COL_DATE: &str = "Date";
const COL_GOAL: &str = "Goal";
const COL_EBITDA: &str = "Annualized EBITDA";
const COL_FIRST_OF_YEAR: &str = "First of the Year";

/// Default date format for the source's date columns.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fallback formats tried when the primary format does not match.
const COMMON_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Read-through accessor for the CSV data source.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// Path to the backing CSV file
    path: PathBuf,
    /// Primary format for the `Date` and `First of the Year` columns
    date_format: String,
}

/// Header positions of the required columns.
struct ColumnLayout {
    date: usize,
    goal: usize,
    ebitda: usize,
    first_of_year: usize,
}

impl DataSource {
    /// Create a data source over `path` with the default date format
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Set the primary date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full dataset, re-reading the backing file.
    ///
    /// Fails fast on the first unreadable file, missing column, or
    /// unparseable cell; there is no partial result.
    pub fn load(&self) -> DataResult<Dataset> {
        let reader = csv::Reader::from_path(&self.path).map_err(|e| DataSourceError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        self.read_rows(reader)
    }

    /// Load a dataset from an in-memory CSV (used by tests)
    pub fn load_from_reader<R: Read>(&self, data: R) -> DataResult<Dataset> {
        self.read_rows(csv::Reader::from_reader(data))
    }

    fn read_rows<R: Read>(&self, mut reader: csv::Reader<R>) -> DataResult<Dataset> {
        let headers = reader.headers().map_err(|e| DataSourceError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        let layout = Self::locate_columns(headers)?;

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // +2: one for the header row, one for 1-based numbering
            let line = idx + 2;
            let record = record.map_err(|e| DataSourceError::Read {
                path: self.path.clone(),
                source: e,
            })?;

            let date = self.parse_date_cell(&record, layout.date, COL_DATE, line)?;
            let goal = parse_number_cell(&record, layout.goal, COL_GOAL, line)?;
            let ebitda = parse_number_cell(&record, layout.ebitda, COL_EBITDA, line)?;

            // Present in the source contract but unused downstream; still
            // validated so a malformed file fails fast.
            self.parse_date_cell(&record, layout.first_of_year, COL_FIRST_OF_YEAR, line)?;

            rows.push(Row::new(date, goal, ebitda));
        }

        Ok(Dataset::new(rows))
    }

    fn locate_columns(headers: &csv::StringRecord) -> DataResult<ColumnLayout> {
        let find = |name: &'static str| -> DataResult<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DataSourceError::MissingColumn(name))
        };

        Ok(ColumnLayout {
            date: find(COL_DATE)?,
            goal: find(COL_GOAL)?,
            ebitda: find(COL_EBITDA)?,
            first_of_year: find(COL_FIRST_OF_YEAR)?,
        })
    }

    fn parse_date_cell(
        &self,
        record: &csv::StringRecord,
        index: usize,
        column: &'static str,
        line: usize,
    ) -> DataResult<NaiveDate> {
        let value = cell(record, index, column, line)?;
        self.parse_date(value)
            .ok_or_else(|| DataSourceError::InvalidDate {
                line,
                column,
                value: value.to_string(),
            })
    }

    /// Parse a date with the primary format, then the common fallbacks
    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(value, &self.date_format) {
            return Some(date);
        }

        for fmt in COMMON_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Some(date);
            }
        }

        None
    }
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    column: &'static str,
    line: usize,
) -> DataResult<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(DataSourceError::MissingValue { line, column })
}

fn parse_number_cell(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
    line: usize,
) -> DataResult<f64> {
    let value = cell(record, index, column, line)?;
    value
        .parse::<f64>()
        .map_err(|_| DataSourceError::InvalidNumber {
            line,
            column,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,Goal,Annualized EBITDA,First of the Year
2022-01-01,100,90,2022-01-01
2022-06-01,110,115,2022-01-01";

    fn source() -> DataSource {
        DataSource::new("data.csv")
    }

    #[test]
    fn test_load_parses_rows_in_order() {
        let dataset = source().load_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        let rows = dataset.rows();
        assert_eq!(rows[0].date.to_string(), "2022-01-01");
        assert_eq!(rows[0].goal, 100.0);
        assert_eq!(rows[0].annualized_ebitda, 90.0);
        assert_eq!(rows[1].date.to_string(), "2022-06-01");
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let reordered = "\
Goal,First of the Year,Annualized EBITDA,Date
100,2022-01-01,90,2022-01-01";

        let dataset = source().load_from_reader(reordered.as_bytes()).unwrap();
        assert_eq!(dataset.rows()[0].goal, 100.0);
        assert_eq!(dataset.rows()[0].annualized_ebitda, 90.0);
    }

    #[test]
    fn test_missing_column_fails() {
        let missing = "Date,Goal,First of the Year\n2022-01-01,100,2022-01-01";

        let err = source().load_from_reader(missing.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::MissingColumn("Annualized EBITDA")
        ));
    }

    #[test]
    fn test_bad_date_fails_with_line_number() {
        let bad = "\
Date,Goal,Annualized EBITDA,First of the Year
2022-01-01,100,90,2022-01-01
not-a-date,110,115,2022-01-01";

        let err = source().load_from_reader(bad.as_bytes()).unwrap_err();
        match err {
            DataSourceError::InvalidDate { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_number_fails() {
        let bad = "\
Date,Goal,Annualized EBITDA,First of the Year
2022-01-01,plenty,90,2022-01-01";

        let err = source().load_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DataSourceError::InvalidNumber { .. }));
    }

    #[test]
    fn test_fallback_date_formats() {
        let us_dates = "\
Date,Goal,Annualized EBITDA,First of the Year
04/09/2022,100,90,01/01/2022";

        let dataset = source().load_from_reader(us_dates.as_bytes()).unwrap();
        assert_eq!(dataset.rows()[0].date.to_string(), "2022-04-09");
    }

    #[test]
    fn test_missing_file_fails() {
        let err = DataSource::new("does-not-exist.csv").load().unwrap_err();
        assert!(matches!(err, DataSourceError::Read { .. }));
    }

    #[test]
    fn test_repeated_loads_are_identical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = DataSource::new(file.path());
        let first = source.load().unwrap();
        let second = source.load().unwrap();

        assert_eq!(first, second);
    }
}
