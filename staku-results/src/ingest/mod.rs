//! Spreadsheet ingestion
//!
//! Turns an uploaded workbook into participant rows:
//! 1. Open the workbook (xlsx, xlsm, xlsb, xls or ods, detected from content)
//! 2. Take the first sheet by position
//! 3. Use its first row as headers, every following non-blank row as a record
//! 4. Map each record through the row schema, preserving sheet order
//!
//! The whole file is accepted or rejected; individual cells never fail a row.

pub mod schema;
pub mod upload;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use staku_common::db::NewRunner;
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, info, warn};

use schema::RawRecord;

pub use upload::StagedUpload;

/// Structural ingestion failures
///
/// The display text of each variant is the message shown to the uploader.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Workbook has no sheets at all
    #[error("El archivo Excel no contiene hojas")]
    EmptyWorkbook,

    /// First sheet exists but could not be materialized
    #[error("No se pudo leer la hoja del Excel")]
    UnreadableSheet(#[source] calamine::Error),

    /// First sheet has no data rows below the header row
    #[error("El archivo Excel está vacío")]
    EmptyContent,

    /// Payload is not a spreadsheet format we can read
    #[error("Error procesando el archivo Excel")]
    InvalidWorkbook(#[source] calamine::Error),

    /// Staged upload could not be written or read back
    #[error("Error procesando el archivo Excel")]
    Io(#[from] std::io::Error),
}

/// Parse spreadsheet bytes into participant rows in sheet order
pub fn ingest(bytes: &[u8]) -> Result<Vec<NewRunner>, IngestError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(IngestError::InvalidWorkbook)?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(IngestError::EmptyWorkbook);
    };

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(IngestError::UnreadableSheet)?;

    let (headers, records) = sheet_records(&range);
    if records.is_empty() {
        return Err(IngestError::EmptyContent);
    }

    debug!("Columns detected in '{}': {:?}", sheet_name, headers);
    let missing: Vec<&str> = schema::headers::ALL
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h == expected))
        .collect();
    if !missing.is_empty() {
        warn!("Sheet '{}' lacks columns {:?}; they default to empty", sheet_name, missing);
    }

    let runners: Vec<NewRunner> = records.iter().map(schema::map_record).collect();
    info!("Parsed {} rows from sheet '{}'", runners.len(), sheet_name);

    Ok(runners)
}

/// Split a sheet into its header names and header-keyed data records
///
/// Columns with an empty header cell are dropped. When a header repeats,
/// the leftmost column wins. Rows whose cells are all empty are skipped.
fn sheet_records(range: &Range<Data>) -> (Vec<String>, Vec<RawRecord>) {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return (Vec::new(), Vec::new());
    };

    let columns: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| Some(schema::cell_text(cell)).filter(|text| !text.is_empty()))
        .collect();

    let records = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            let mut record = RawRecord::new();
            for (column, cell) in columns.iter().zip(row) {
                if let Some(header) = column {
                    record.entry(header.clone()).or_insert_with(|| cell.clone());
                }
            }
            record
        })
        .collect();

    let headers = columns.into_iter().flatten().collect();
    (headers, records)
}
