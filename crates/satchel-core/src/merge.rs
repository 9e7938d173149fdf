//! The roster × progress merge join.
//!
//! For each roster row, the first progress row whose `Roll No.` and `Section`
//! match the roster row's `Roll` and `Section` supplies the academic records.
//! First match in file order wins; further matches for the same key are
//! logged and ignored. The join is a nested loop, O(n·m) — fine at
//! single-school scale, unindexed on purpose.

use serde_json::Map;

use crate::class_id::ClassId;
use crate::error::{Error, Result};
use crate::record::{RowRecord, StudentRecord, field_str, field_u32};

// Roster sheet column headers.
const ROSTER_ROLL: &str = "Roll";
const ROSTER_CLASS: &str = "Class";
const ROSTER_SECTION: &str = "Section";
const ROSTER_NAME: &str = "Name";
const ROSTER_DOB: &str = "Date of Birth";

// Progress sheet column headers.
const PROGRESS_ROLL: &str = "Roll No.";
const PROGRESS_SECTION: &str = "Section";

/// One merged student, ready to upsert into its class table.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedStudent {
    /// The class whose table the record belongs in.
    pub class: ClassId,
    /// The merged record body.
    pub record: StudentRecord,
}

/// Join roster rows against progress rows.
///
/// Name and date of birth come from the roster row; `academic_records` is the
/// first matching progress row copied verbatim, or an empty object when no
/// progress row matches. A roster row missing `Roll`, `Class`, or `Section`
/// fails the whole batch.
pub fn merge_rows(roster: &[RowRecord], progress: &[RowRecord]) -> Result<Vec<MergedStudent>> {
    let mut merged = Vec::with_capacity(roster.len());

    for (idx, student) in roster.iter().enumerate() {
        let row_no = idx + 1;
        let roll = match field_str(student, ROSTER_ROLL) {
            None => {
                return Err(Error::MissingColumn {
                    column: ROSTER_ROLL,
                    row: row_no,
                });
            }
            Some(raw) => field_u32(student, ROSTER_ROLL).ok_or(Error::InvalidRoll {
                value: raw,
                row: row_no,
            })?,
        };
        let class_raw = field_str(student, ROSTER_CLASS).ok_or(Error::MissingColumn {
            column: ROSTER_CLASS,
            row: row_no,
        })?;
        let class = ClassId::parse(&class_raw)?;
        let section = field_str(student, ROSTER_SECTION).ok_or(Error::MissingColumn {
            column: ROSTER_SECTION,
            row: row_no,
        })?;

        let academic_records = match_progress(progress, roll, &section);

        let record = StudentRecord {
            name: field_str(student, ROSTER_NAME).unwrap_or_default(),
            class: class.as_str().to_string(),
            section,
            roll,
            dob: field_str(student, ROSTER_DOB).unwrap_or_default(),
            academic_records,
        };
        merged.push(MergedStudent { class, record });
    }

    Ok(merged)
}

/// Find the first progress row matching (roll, section), copied verbatim.
fn match_progress(progress: &[RowRecord], roll: u32, section: &str) -> Map<String, serde_json::Value> {
    let mut matches = progress
        .iter()
        .filter(|rec| {
            field_u32(rec, PROGRESS_ROLL) == Some(roll)
                && field_str(rec, PROGRESS_SECTION).as_deref() == Some(section)
        });

    let first = matches.next();
    if matches.next().is_some() {
        log::warn!("multiple progress rows match roll {roll} section {section}; using the first");
    }

    first.cloned().unwrap_or_default()
}
