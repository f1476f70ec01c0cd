//! Excel and OpenDocument workbooks.

use super::loader::frame_from_records;
use super::DataFrame;
use crate::error::{PanganError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Loads the first worksheet of an `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or
/// `.ods` workbook.
///
/// The first row of the used range is the header. Label-column detection
/// and cell errors follow [`CsvLoader`](super::CsvLoader); `Parse` errors
/// carry the 1-based sheet row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelLoader;

impl ExcelLoader {
    /// Load the first worksheet of a workbook on disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, `Parse` for an unreadable
    /// workbook or a bad cell, and `EmptyInput` for a workbook without
    /// sheets or data.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading workbook");
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PanganError::empty_input("workbook has no worksheets"))??;
        Self::from_range(&range)
    }

    /// Build a frame from an already loaded worksheet range.
    ///
    /// # Errors
    ///
    /// Same as [`ExcelLoader::load`], minus the workbook errors.
    pub fn from_range(range: &Range<Data>) -> Result<DataFrame> {
        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(cells) => cells.iter().map(cell_text).collect(),
            None => return Err(PanganError::empty_input("sheet has no header row")),
        };

        let records = rows
            .enumerate()
            .map(|(i, cells)| (first_row + i + 2, cells.iter().map(cell_text).collect()))
            .collect();

        frame_from_records("sheet", &headers, records)
    }
}

/// Text of one cell, the way a CSV export would print it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

impl From<calamine::Error> for PanganError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(io) => PanganError::Io(io),
            other => PanganError::Parse {
                line: 0,
                message: format!("unreadable workbook: {other}"),
            },
        }
    }
}
