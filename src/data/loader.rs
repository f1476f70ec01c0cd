//! CSV reading and writing for [`DataFrame`], plus the record-to-frame
//! rules every spreadsheet reader shares.

use super::DataFrame;
use crate::error::{PanganError, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Loads price spreadsheets exported as CSV.
///
/// The header row names the columns. The first column is treated as the row
/// index when its header cell is blank or none of its values are numbers;
/// every remaining cell must be a finite number.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl CsvLoader {
    /// Load a CSV file from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, `Parse` for malformed or
    /// non-numeric cells, and `EmptyInput` if there is nothing to cluster.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "loading csv");
        Self::from_reader(file)
    }

    /// Parse CSV text from any reader.
    ///
    /// # Errors
    ///
    /// Same as [`CsvLoader::load`], minus the file open.
    pub fn from_reader<R: Read>(reader: R) -> Result<DataFrame> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(PanganError::empty_input("CSV has no header row"));
        }

        let mut records: Vec<(usize, Vec<String>)> = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map_or(records.len() + 2, |p| usize::try_from(p.line()).unwrap_or(usize::MAX));
            records.push((line, record.iter().map(str::to_string).collect()));
        }

        frame_from_records("CSV", &headers, records)
    }
}

/// Builds a frame from a header row and numbered text records.
///
/// Shared by every spreadsheet reader so the label-column rule and the
/// per-cell errors are identical across formats. Records whose cells are
/// all blank are skipped.
pub(super) fn frame_from_records(
    source: &str,
    headers: &[String],
    records: Vec<(usize, Vec<String>)>,
) -> Result<DataFrame> {
    let records: Vec<(usize, Vec<String>)> = records
        .into_iter()
        .filter(|(_, cells)| !cells.iter().all(String::is_empty))
        .collect();

    if records.is_empty() {
        return Err(PanganError::empty_input(&format!("{source} has no data rows")));
    }

    let labelled = is_label_column(headers, &records);
    let first_value = usize::from(labelled);

    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .skip(first_value)
        .map(|(j, h)| {
            if h.is_empty() {
                format!("Unnamed: {j}")
            } else {
                h.clone()
            }
        })
        .collect();

    if names.is_empty() {
        return Err(PanganError::empty_input(&format!("{source} has no numeric columns")));
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); names.len()];
    let mut index = Vec::with_capacity(records.len());

    for (line, cells) in &records {
        if labelled {
            index.push(cells.first().cloned().unwrap_or_default());
        }
        for (slot, (name, column)) in names.iter().zip(columns.iter_mut()).enumerate() {
            let raw = cells.get(slot + first_value).map_or("", String::as_str);
            column.push(parse_cell(raw, *line, name)?);
        }
    }

    let columns = names.into_iter().zip(columns).collect();
    let frame = if labelled {
        DataFrame::new(index, columns)?
    } else {
        DataFrame::with_default_index(columns)?
    };

    tracing::debug!(
        source,
        rows = frame.n_rows(),
        cols = frame.n_cols(),
        labelled,
        "table parsed"
    );
    Ok(frame)
}

fn is_label_column(headers: &[String], records: &[(usize, Vec<String>)]) -> bool {
    if headers.first().is_some_and(String::is_empty) {
        return true;
    }
    records.iter().all(|(_, cells)| {
        cells
            .first()
            .is_some_and(|v| !v.is_empty() && v.parse::<f64>().is_err())
    })
}

fn parse_cell(raw: &str, line: usize, column: &str) -> Result<f64> {
    if raw.is_empty() {
        return Err(PanganError::Parse {
            line,
            message: format!("missing value in column '{column}'"),
        });
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(PanganError::Parse {
            line,
            message: format!("non-finite value '{raw}' in column '{column}'"),
        }),
        Err(_) => Err(PanganError::Parse {
            line,
            message: format!("non-numeric value '{raw}' in column '{column}'"),
        }),
    }
}

impl DataFrame {
    /// Writes the frame as CSV.
    ///
    /// Data-supplied row labels go in a leading column with a blank header,
    /// so the output loads back into the same shape. Frames with default
    /// `row_N` labels are written without that column.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn to_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = WriterBuilder::new().from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(self.n_cols() + 1);
        if self.labelled_index {
            header.push("");
        }
        header.extend(self.column_names());
        out.write_record(&header)?;

        for (i, label) in self.index.iter().enumerate() {
            let mut record: Vec<String> = Vec::with_capacity(self.n_cols() + 1);
            if self.labelled_index {
                record.push(label.clone());
            }
            record.extend(self.columns.iter().map(|(_, col)| col[i].to_string()));
            out.write_record(&record)?;
        }

        out.flush()?;
        Ok(())
    }
}
