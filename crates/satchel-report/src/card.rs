//! Projection of stored records into the fixed report-card shape.
//!
//! Uploaded progress sheets are stored verbatim as an open-ended column map.
//! The report card reads that map back out by convention: a column named
//! `<Subject> <PERIOD>` (e.g. "English PT1", "Maths Annual") contributes one
//! period score to that subject's row. Summary columns (`Total Marks`,
//! `Percentage`, `Rank`, `Result`) are taken from the sheet when present and
//! computed from the subject rows otherwise.

use satchel_core::StudentRecord;
use serde_json::Value;

use crate::error::{Error, Result};

/// The six period columns of the marks table, in display order.
pub const PERIODS: [&str; 6] = ["PT1", "PT2", "HY", "PT3", "PT4", "Annual"];

/// One subject row of the marks table.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMarks {
    /// Subject name as it appeared in the sheet.
    pub subject: String,
    /// Scores for the six periods, in [`PERIODS`] order.
    pub scores: [f64; 6],
}

/// A student's report card, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    /// Student name.
    pub name: String,
    /// Class identifier.
    pub class: String,
    /// Section within the class.
    pub section: String,
    /// Roll number.
    pub roll: u32,
    /// Date of birth.
    pub dob: String,
    /// Subject rows, in first-seen sheet order.
    pub subjects: Vec<SubjectMarks>,
    /// Total marks across all subjects and periods.
    pub total_marks: f64,
    /// Percentage scored.
    pub percentage: f64,
    /// Class rank, when the sheet supplies one.
    pub rank: Option<String>,
    /// Pass/fail result, when the sheet supplies one.
    pub result: Option<String>,
}

impl ReportCard {
    /// Derive a report card from a stored record.
    ///
    /// A subject mentioned by any period column must carry all six period
    /// scores; a missing or non-numeric score is an error, not a panic.
    /// Records with no period-shaped columns yield a card with an empty
    /// marks table.
    pub fn from_record(record: &StudentRecord) -> Result<Self> {
        let mut subjects: Vec<(String, [Option<f64>; 6])> = Vec::new();
        let mut total: Option<f64> = None;
        let mut percentage: Option<f64> = None;
        let mut rank: Option<String> = None;
        let mut result: Option<String> = None;

        for (key, value) in &record.academic_records {
            if let Some((subject, period_idx)) = split_period_key(key) {
                let score = match numeric(value) {
                    Some(score) => score,
                    None => {
                        return Err(Error::NonNumericScore {
                            subject: subject.to_string(),
                            period: PERIODS[period_idx],
                            value: value.to_string(),
                        });
                    }
                };
                let row = match subjects.iter().position(|(name, _)| name == subject) {
                    Some(idx) => idx,
                    None => {
                        subjects.push((subject.to_string(), [None; 6]));
                        subjects.len() - 1
                    }
                };
                subjects[row].1[period_idx] = Some(score);
                continue;
            }

            match key.trim().to_lowercase().as_str() {
                "total marks" => total = numeric(value),
                "percentage" => percentage = numeric(value),
                "rank" => rank = display_value(value),
                "result" => result = display_value(value),
                _ => {}
            }
        }

        let mut rows = Vec::with_capacity(subjects.len());
        for (subject, scores) in subjects {
            let mut complete = [0.0; 6];
            for (idx, score) in scores.into_iter().enumerate() {
                complete[idx] = score.ok_or_else(|| Error::MissingScore {
                    subject: subject.clone(),
                    period: PERIODS[idx],
                })?;
            }
            rows.push(SubjectMarks {
                subject,
                scores: complete,
            });
        }

        let computed_total: f64 = rows.iter().map(|r| r.scores.iter().sum::<f64>()).sum();
        let total_marks = total.unwrap_or(computed_total);
        // Each period is scored out of 100.
        let percentage = percentage.unwrap_or(if rows.is_empty() {
            0.0
        } else {
            computed_total / (6.0 * rows.len() as f64)
        });

        Ok(Self {
            name: record.name.clone(),
            class: record.class.clone(),
            section: record.section.clone(),
            roll: record.roll,
            dob: record.dob.clone(),
            subjects: rows,
            total_marks,
            percentage,
            rank,
            result,
        })
    }
}

/// Split a `<Subject> <PERIOD>` column name. Returns the subject prefix and
/// the period's index into [`PERIODS`], or `None` for non-period columns.
fn split_period_key(key: &str) -> Option<(&str, usize)> {
    let (subject, period) = key.trim().rsplit_once(' ')?;
    let subject = subject.trim();
    if subject.is_empty() {
        return None;
    }
    PERIODS
        .iter()
        .position(|p| p.eq_ignore_ascii_case(period))
        .map(|idx| (subject, idx))
}

/// Read a cell as a number, accepting numeric strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Stringify a summary cell for display.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(academic: serde_json::Value) -> StudentRecord {
        StudentRecord {
            name: "Asha".to_string(),
            class: "5".to_string(),
            section: "A".to_string(),
            roll: 1,
            dob: "2010-01-01".to_string(),
            academic_records: academic.as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_from_record_groups_subjects_in_sheet_order() {
        let record = record_with(json!({
            "Roll No.": 1,
            "Maths PT1": 10, "Maths PT2": 20, "Maths HY": 30,
            "Maths PT3": 40, "Maths PT4": 50, "Maths Annual": 60,
            "English PT1": 1, "English PT2": 2, "English HY": 3,
            "English PT3": 4, "English PT4": 5, "English Annual": 6
        }));
        let card = ReportCard::from_record(&record).unwrap();

        assert_eq!(card.subjects.len(), 2);
        assert_eq!(card.subjects[0].subject, "Maths");
        assert_eq!(card.subjects[0].scores, [10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(card.subjects[1].subject, "English");
    }

    #[test]
    fn test_from_record_computes_total_and_percentage() {
        let record = record_with(json!({
            "Maths PT1": 100, "Maths PT2": 100, "Maths HY": 100,
            "Maths PT3": 100, "Maths PT4": 50, "Maths Annual": 50
        }));
        let card = ReportCard::from_record(&record).unwrap();
        assert_eq!(card.total_marks, 500.0);
        assert!((card.percentage - 500.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_record_sheet_summary_wins() {
        let record = record_with(json!({
            "Maths PT1": 10, "Maths PT2": 10, "Maths HY": 10,
            "Maths PT3": 10, "Maths PT4": 10, "Maths Annual": 10,
            "Total Marks": 999, "Percentage": 99.9, "Rank": 2, "Result": "Pass"
        }));
        let card = ReportCard::from_record(&record).unwrap();
        assert_eq!(card.total_marks, 999.0);
        assert_eq!(card.percentage, 99.9);
        assert_eq!(card.rank.as_deref(), Some("2"));
        assert_eq!(card.result.as_deref(), Some("Pass"));
    }

    #[test]
    fn test_from_record_missing_period_errors() {
        let record = record_with(json!({
            "Maths PT1": 10, "Maths PT2": 10, "Maths HY": 10,
            "Maths PT3": 10, "Maths PT4": 10
        }));
        let err = ReportCard::from_record(&record).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingScore { ref subject, period: "Annual" } if subject == "Maths"
        ));
    }

    #[test]
    fn test_from_record_non_numeric_score_errors() {
        let record = record_with(json!({
            "Maths PT1": "absent"
        }));
        let err = ReportCard::from_record(&record).unwrap_err();
        assert!(matches!(err, Error::NonNumericScore { period: "PT1", .. }));
    }

    #[test]
    fn test_from_record_numeric_string_scores_accepted() {
        let record = record_with(json!({
            "Maths PT1": "10", "Maths PT2": "20", "Maths HY": "30",
            "Maths PT3": "40", "Maths PT4": "50", "Maths Annual": "60"
        }));
        let card = ReportCard::from_record(&record).unwrap();
        assert_eq!(card.subjects[0].scores[5], 60.0);
    }

    #[test]
    fn test_from_record_without_period_columns() {
        let record = record_with(json!({"Roll No.": 1, "Section": "A", "marks": 90}));
        let card = ReportCard::from_record(&record).unwrap();
        assert!(card.subjects.is_empty());
        assert_eq!(card.total_marks, 0.0);
        assert_eq!(card.percentage, 0.0);
        assert!(card.rank.is_none());
    }

    #[test]
    fn test_split_period_key() {
        assert_eq!(split_period_key("English PT1"), Some(("English", 0)));
        assert_eq!(split_period_key("Social Studies annual"), Some(("Social Studies", 5)));
        assert_eq!(split_period_key("Roll No."), None);
        assert_eq!(split_period_key("PT1"), None);
    }

    #[test]
    fn test_identity_fields_copied() {
        let record = record_with(json!({}));
        let card = ReportCard::from_record(&record).unwrap();
        assert_eq!(card.name, "Asha");
        assert_eq!(card.class, "5");
        assert_eq!(card.section, "A");
        assert_eq!(card.roll, 1);
        assert_eq!(card.dob, "2010-01-01");
    }
}
