//! In-memory CSV table
//!
//! The whole file is read before any row is transformed, so a missing column
//! or a malformed record aborts the run before anything is written.

use crate::domain::{AnonymizerError, Result};
use std::path::Path;

/// Header plus string cells, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a CSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns an input format error naming the file if it cannot be opened
    /// or a record cannot be parsed (e.g. wrong delimiter, ragged rows).
    pub fn read_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |e: csv::Error| {
            AnonymizerError::InputFormat(format!(
                "Unable to read CSV file {}, verify the contents and make sure the delimiter is set correctly: {e}",
                path.display()
            ))
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)
            .map_err(unreadable)?;

        let headers = reader
            .headers()
            .map_err(unreadable)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(unreadable)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(
            path = %path.display(),
            rows = rows.len(),
            "Read CSV file"
        );

        Ok(Self { headers, rows })
    }

    /// Write the table as CSV, header first
    pub fn write_csv(&self, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
        let path = path.as_ref();
        let failed = |e: csv::Error| {
            AnonymizerError::Io(format!(
                "Failed to write CSV file {}: {e}",
                path.display()
            ))
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(path)
            .map_err(failed)?;

        writer.write_record(&self.headers).map_err(failed)?;
        for row in &self.rows {
            writer.write_record(row).map_err(failed)?;
        }
        writer
            .flush()
            .map_err(|e| AnonymizerError::Io(format!("Failed to flush {}: {e}", path.display())))?;

        Ok(())
    }

    /// Column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| {
            AnonymizerError::InputFormat(format!(
                "Supplied text column '{name}' couldn't be found in supplied file"
            ))
        })
    }

    /// Fail if any of `names` is not a column
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            self.column_index(name.as_ref())?;
        }
        Ok(())
    }

    /// Cells of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect())
    }

    /// Replace the cells of one column, in row order
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        let idx = self.column_index(name)?;
        if values.len() != self.rows.len() {
            return Err(AnonymizerError::Other(format!(
                "Column '{name}' has {} rows but {} values were supplied",
                self.rows.len(),
                values.len()
            )));
        }

        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(cell) = row.get_mut(idx) {
                *cell = value;
            }
        }
        Ok(())
    }
}
