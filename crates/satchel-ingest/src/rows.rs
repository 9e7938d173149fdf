//! Grid-to-record conversion shared by the CSV and XLSX parsers.

use satchel_core::RowRecord;
use serde_json::Value;

/// A parsed sheet as a dense grid; `None` marks an empty cell.
pub(crate) type Grid = Vec<Vec<Option<Value>>>;

/// Type a raw cell string: integers and floats become JSON numbers,
/// everything else a string. Empty cells become `None`.
pub(crate) fn cell_value(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Some(Value::Number(n));
        }
    }
    Some(Value::String(trimmed.to_string()))
}

/// Convert a grid into row records: the first non-empty row supplies the
/// headers, each following row becomes one record keyed by header. Cells
/// beyond the header width and cells under an empty header are dropped;
/// all-empty rows are skipped.
pub(crate) fn grid_to_records(grid: Grid) -> Vec<RowRecord> {
    let mut iter = grid.into_iter();

    let headers: Vec<Option<String>> = loop {
        match iter.next() {
            None => return Vec::new(),
            Some(row) if row.iter().all(Option::is_none) => continue,
            Some(row) => {
                break row
                    .into_iter()
                    .map(|cell| cell.map(header_text))
                    .collect();
            }
        }
    };

    let mut records = Vec::new();
    for row in iter {
        if row.iter().all(Option::is_none) {
            continue;
        }
        let mut record = RowRecord::new();
        for (header, cell) in headers.iter().zip(row) {
            if let (Some(header), Some(value)) = (header, cell) {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }
    records
}

/// Render a header cell as a column name.
fn header_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_integer() {
        assert_eq!(cell_value("42"), Some(json!(42)));
    }

    #[test]
    fn test_cell_value_float() {
        assert_eq!(cell_value("2.5"), Some(json!(2.5)));
    }

    #[test]
    fn test_cell_value_string() {
        assert_eq!(cell_value("Asha"), Some(json!("Asha")));
    }

    #[test]
    fn test_cell_value_empty() {
        assert_eq!(cell_value(""), None);
        assert_eq!(cell_value("   "), None);
    }

    #[test]
    fn test_grid_to_records_basic() {
        let grid = vec![
            vec![Some(json!("Roll")), Some(json!("Name"))],
            vec![Some(json!(1)), Some(json!("Asha"))],
        ];
        let records = grid_to_records(grid);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Roll"], json!(1));
        assert_eq!(records[0]["Name"], json!("Asha"));
    }

    #[test]
    fn test_grid_to_records_skips_blank_rows() {
        let grid = vec![
            vec![None, None],
            vec![Some(json!("Roll"))],
            vec![None],
            vec![Some(json!(2))],
        ];
        let records = grid_to_records(grid);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Roll"], json!(2));
    }

    #[test]
    fn test_grid_to_records_empty_cell_is_absent_key() {
        let grid = vec![
            vec![Some(json!("Roll")), Some(json!("Name"))],
            vec![Some(json!(1)), None],
        ];
        let records = grid_to_records(grid);
        assert!(!records[0].contains_key("Name"));
    }

    #[test]
    fn test_grid_to_records_extra_cells_ignored() {
        let grid = vec![
            vec![Some(json!("Roll"))],
            vec![Some(json!(1)), Some(json!("stray"))],
        ];
        let records = grid_to_records(grid);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_grid_to_records_numeric_header_stringified() {
        let grid = vec![
            vec![Some(json!(2024))],
            vec![Some(json!("x"))],
        ];
        let records = grid_to_records(grid);
        assert_eq!(records[0]["2024"], json!("x"));
    }

    #[test]
    fn test_grid_to_records_empty_grid() {
        assert!(grid_to_records(Vec::new()).is_empty());
    }
}
