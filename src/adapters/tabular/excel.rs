//! Spreadsheet source and sink
//!
//! The first worksheet is read; its first row is the header. Cells are
//! converted to their display text, so numbers and dates come back the way
//! the CSV path would hold them. Output is always a single-sheet `.xlsx`
//! workbook with every cell written as text.

use super::csv_table::Table;
use crate::domain::{AnonymizerError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Read the first worksheet of an `.xls` or `.xlsx` file
///
/// # Errors
///
/// Returns an input format error naming the file if the workbook cannot be
/// opened, has no worksheet, or its first sheet is empty.
pub fn read_workbook(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let unreadable = |reason: String| {
        AnonymizerError::InputFormat(format!(
            "Unable to read Excel file {}, verify contents, save again in Excel and try again: {reason}",
            path.display()
        ))
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| unreadable("workbook has no worksheet".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| unreadable(e.to_string()))?;

    let mut rows = range.rows().map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows
        .next()
        .ok_or_else(|| unreadable(format!("worksheet '{sheet}' is empty")))?;
    let rows: Vec<Vec<String>> = rows.collect();

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet,
        rows = rows.len(),
        "Read Excel file"
    );

    Ok(Table::new(headers, rows))
}

/// Write the table as a single-sheet `.xlsx` workbook, header first
///
/// Empty cells are left blank.
pub fn write_workbook(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let failed = |reason: String| {
        AnonymizerError::Io(format!(
            "Failed to write Excel file {}: {reason}",
            path.display()
        ))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let lines = std::iter::once(table.headers()).chain(table.rows().iter().map(Vec::as_slice));
    for (row_idx, cells) in lines.enumerate() {
        let row = u32::try_from(row_idx)
            .map_err(|_| failed(format!("row {row_idx} exceeds the sheet size")))?;
        for (col_idx, value) in cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col = u16::try_from(col_idx)
                .map_err(|_| failed(format!("column {col_idx} exceeds the sheet size")))?;
            worksheet
                .write_string(row, col, value.as_str())
                .map_err(|e| failed(e.to_string()))?;
        }
    }

    workbook.save(path).map_err(|e| failed(e.to_string()))?;
    Ok(())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
