//! Student records and parsed spreadsheet rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One parsed spreadsheet row: column header → cell value.
///
/// Empty cells are omitted, so missing columns surface as absent keys.
pub type RowRecord = Map<String, Value>;

/// The stored record for one student.
///
/// One logical storage table exists per class; within a class table the
/// (section, roll) pair is unique. The record is written wholesale on every
/// upload that matches it and never partially patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student name, from the roster sheet.
    pub name: String,
    /// Class the record belongs to (normalized identifier).
    pub class: String,
    /// Section within the class.
    pub section: String,
    /// Roll number within the section.
    pub roll: u32,
    /// Date of birth, stored as the roster sheet supplied it.
    pub dob: String,
    /// The matched academic-progress row, copied verbatim. Empty when no
    /// progress row matched this student.
    pub academic_records: Map<String, Value>,
}

/// Read a cell as a string, stringifying numbers.
///
/// Returns `None` for absent keys and for values that are neither strings
/// nor numbers.
pub fn field_str(row: &RowRecord, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a cell as an unsigned integer, accepting numbers and numeric strings.
pub fn field_u32(row: &RowRecord, key: &str) -> Option<u32> {
    match row.get(key)? {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                u32::try_from(i).ok()
            } else {
                // Spreadsheet numerics are often floats; accept exact integers.
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
