//! Tabular source and sink for verbatim columns

pub mod csv_table;
pub mod excel;

pub use csv_table::Table;

use crate::domain::{AnonymizerError, Result};
use std::path::Path;

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Delimiter-separated values
    Csv,
    /// Excel workbook, `.xls` or `.xlsx`
    Excel,
}

impl TabularFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns an input format error for any extension other than `.csv`,
    /// `.xls` or `.xlsx`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xls" | "xlsx") => Ok(Self::Excel),
            _ => Err(AnonymizerError::InputFormat(format!(
                "Invalid file extension for {}, supply either .csv or .xls/.xlsx",
                path.display()
            ))),
        }
    }

    /// Detect the format of an output path
    ///
    /// Workbooks can only be written as `.xlsx`.
    ///
    /// # Errors
    ///
    /// Returns an input format error for `.xls` and for anything
    /// [`TabularFormat::from_path`] rejects.
    pub fn for_output(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if extension(path).as_deref() == Some("xls") {
            return Err(AnonymizerError::InputFormat(format!(
                "Cannot write legacy .xls file {}, use .xlsx or .csv for the output",
                path.display()
            )));
        }
        Self::from_path(path)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

impl Table {
    /// Read a table in the given format; the delimiter only applies to CSV
    pub fn read(path: impl AsRef<Path>, format: TabularFormat, delimiter: u8) -> Result<Self> {
        match format {
            TabularFormat::Csv => Self::read_csv(path, delimiter),
            TabularFormat::Excel => excel::read_workbook(path),
        }
    }

    /// Write the table in the given format; the delimiter only applies to CSV
    pub fn write(&self, path: impl AsRef<Path>, format: TabularFormat, delimiter: u8) -> Result<()> {
        match format {
            TabularFormat::Csv => self.write_csv(path, delimiter),
            TabularFormat::Excel => excel::write_workbook(self, path),
        }
    }
}

/// Convert a delimiter character to the single byte the CSV reader expects
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() && delimiter != '"' && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(AnonymizerError::Configuration(format!(
            "Invalid delimiter {delimiter:?}: must be a single ASCII character other than a quote or newline"
        )))
    }
}
