//! Spreadsheet ingestion for Satchel.
//!
//! Parses an uploaded tabular file into an ordered sequence of row records
//! (column header → cell value), using the first sheet of the file. The
//! container format is sniffed from the file's magic bytes: a ZIP signature
//! means XLSX, anything else is read as CSV.
//!
//! No schema validation is performed; empty cells are omitted so missing
//! columns surface as absent keys downstream.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
mod rows;
mod sheet_csv;
mod xlsx;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use satchel_core::RowRecord;

pub use error::{Error, Result};

/// ZIP local-file-header signature; XLSX files are ZIP containers.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// Parse the first sheet of the file at `path` into row records.
///
/// The first non-empty row supplies the column headers; each following row
/// becomes one record. Rows whose cells are all empty are skipped.
pub fn parse_sheet(path: &Path) -> Result<Vec<RowRecord>> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 4];
    let n = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    if n == 4 && magic == ZIP_MAGIC {
        xlsx::parse_first_sheet(file)
    } else {
        sheet_csv::parse(file)
    }
}
