//! The record store.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};

use satchel_core::{ClassId, StudentRecord};

use crate::error::Result;

/// Table definition for one class: (section, roll) → JSON record body.
fn class_table(namespace: &str) -> TableDefinition<'_, (&'static str, u32), &'static [u8]> {
    TableDefinition::new(namespace)
}

/// Handle to the embedded student-record database.
///
/// Cheap to clone; all clones share one database. Operations are synchronous
/// — callers on an async runtime should wrap them in `spawn_blocking`.
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: Arc::new(Database::create(path)?),
        })
    }

    /// Create or wholesale-replace the record at (section, roll) within the
    /// class's table. The table is created on first write.
    pub fn upsert(&self, class: &ClassId, record: &StudentRecord) -> Result<()> {
        let namespace = class.namespace();
        let value = serde_json::to_vec(record)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(class_table(&namespace))?;
            table.insert((record.section.as_str(), record.roll), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Look up the record matching all four identity fields exactly.
    ///
    /// Returns `None` when the class table does not exist, when no record
    /// sits at (section, roll), or when the stored date of birth differs.
    pub fn find_one(
        &self,
        class: &ClassId,
        section: &str,
        roll: u32,
        dob: &str,
    ) -> Result<Option<StudentRecord>> {
        let namespace = class.namespace();
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(class_table(&namespace)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let Some(guard) = table.get((section, roll))? else {
            return Ok(None);
        };
        let record: StudentRecord = serde_json::from_slice(guard.value())?;
        if record.dob == dob {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// All records for one section of a class, ordered by roll number.
    ///
    /// A class with no table yet yields an empty vec.
    pub fn find_class_section(&self, class: &ClassId, section: &str) -> Result<Vec<StudentRecord>> {
        let namespace = class.namespace();
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(class_table(&namespace)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in table.range((section, 0u32)..=(section, u32::MAX))? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = RecordStore::open(&dir.path().join("satchel.redb")).unwrap();
        (dir, store)
    }

    fn record(roll: u32, section: &str, dob: &str) -> StudentRecord {
        StudentRecord {
            name: format!("student-{roll}"),
            class: "5".to_string(),
            section: section.to_string(),
            roll,
            dob: dob.to_string(),
            academic_records: json!({"marks": 90}).as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_upsert_then_find_one() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("5").unwrap();
        store.upsert(&class, &record(1, "A", "2010-01-01")).unwrap();

        let found = store.find_one(&class, "A", 1, "2010-01-01").unwrap();
        assert_eq!(found.unwrap().name, "student-1");
    }

    #[test]
    fn test_find_one_requires_exact_dob() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("5").unwrap();
        store.upsert(&class, &record(1, "A", "2010-01-01")).unwrap();

        assert!(store.find_one(&class, "A", 1, "2010-01-02").unwrap().is_none());
    }

    #[test]
    fn test_find_one_wrong_section_or_roll() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("5").unwrap();
        store.upsert(&class, &record(1, "A", "2010-01-01")).unwrap();

        assert!(store.find_one(&class, "B", 1, "2010-01-01").unwrap().is_none());
        assert!(store.find_one(&class, "A", 2, "2010-01-01").unwrap().is_none());
    }

    #[test]
    fn test_find_one_missing_class_table() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("9").unwrap();
        assert!(store.find_one(&class, "A", 1, "2010-01-01").unwrap().is_none());
    }

    #[test]
    fn test_upsert_overwrites_wholesale() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("5").unwrap();
        store.upsert(&class, &record(1, "A", "2010-01-01")).unwrap();

        let mut replacement = record(1, "A", "2010-01-01");
        replacement.name = "renamed".to_string();
        replacement.academic_records.clear();
        store.upsert(&class, &replacement).unwrap();

        let found = store.find_one(&class, "A", 1, "2010-01-01").unwrap().unwrap();
        assert_eq!(found.name, "renamed");
        assert!(found.academic_records.is_empty());
    }

    #[test]
    fn test_find_class_section_ordered_by_roll() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("5").unwrap();
        for roll in [3, 1, 2] {
            store.upsert(&class, &record(roll, "A", "2010-01-01")).unwrap();
        }
        store.upsert(&class, &record(5, "B", "2010-01-01")).unwrap();

        let rolls: Vec<u32> = store
            .find_class_section(&class, "A")
            .unwrap()
            .iter()
            .map(|r| r.roll)
            .collect();
        assert_eq!(rolls, vec![1, 2, 3]);
    }

    #[test]
    fn test_find_class_section_missing_table_is_empty() {
        let (_dir, store) = test_store();
        let class = ClassId::parse("absent").unwrap();
        assert!(store.find_class_section(&class, "A").unwrap().is_empty());
    }

    #[test]
    fn test_classes_are_isolated() {
        let (_dir, store) = test_store();
        let five = ClassId::parse("5").unwrap();
        let six = ClassId::parse("6").unwrap();
        store.upsert(&five, &record(1, "A", "2010-01-01")).unwrap();

        assert!(store.find_one(&six, "A", 1, "2010-01-01").unwrap().is_none());
        assert!(store.find_class_section(&six, "A").unwrap().is_empty());
    }
}
