//! CSV parsing into row records.

use std::io::Read;

use satchel_core::RowRecord;

use crate::error::Result;
use crate::rows::{cell_value, grid_to_records};

/// Parse CSV content into row records. Ragged rows are tolerated: short rows
/// yield absent keys, long rows drop the surplus cells.
pub(crate) fn parse<R: Read>(reader: R) -> Result<Vec<RowRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(record.iter().map(cell_value).collect());
    }
    Ok(grid_to_records(grid))
}
