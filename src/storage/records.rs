//! JSONL record stores
//!
//! Each record type lives in its own `.rota/{name}.jsonl` file with one
//! JSON object per line. Reads take a shared `fs2` lock, writes take an
//! exclusive lock and go through a temp file + atomic rename.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::hash::Hash;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::{
    ApplicationId, Assignment, AssignmentId, House, HouseId, Shift, ShiftApplication, ShiftId,
    ShiftTemplate, Staff, StaffId, TemplateId,
};

/// A record type persisted in a JSONL store
pub trait Record: Serialize + DeserializeOwned + Clone {
    type Id: Eq + Hash + Ord + Clone;

    /// Store file name under `.rota/`, e.g. `shifts.jsonl`
    const FILE_NAME: &'static str;

    fn id(&self) -> &Self::Id;

    /// Sort key for stable file output
    fn sort_key(&self) -> String;
}

macro_rules! record_impl {
    ($ty:ty, $id:ty, $file:literal) => {
        impl Record for $ty {
            type Id = $id;
            const FILE_NAME: &'static str = $file;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn sort_key(&self) -> String {
                self.id.to_string()
            }
        }
    };
}

record_impl!(House, HouseId, "houses.jsonl");
record_impl!(Staff, StaffId, "staff.jsonl");
record_impl!(Shift, ShiftId, "shifts.jsonl");
record_impl!(Assignment, AssignmentId, "assignments.jsonl");
record_impl!(ShiftTemplate, TemplateId, "templates.jsonl");
record_impl!(ShiftApplication, ApplicationId, "applications.jsonl");

/// Store for one record type in JSONL format
pub struct RecordStore<R: Record> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

impl<R: Record> RecordStore<R> {
    /// Creates a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Creates the default store inside a `.rota` directory
    pub fn in_dir(rota_dir: &Path) -> Self {
        Self::new(rota_dir.join(R::FILE_NAME))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records from the store
    pub fn read_all(&self) -> Result<HashMap<R::Id, R>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open store: {}", self.path.display()))?;

        // Shared lock for reading
        file.lock_shared()
            .with_context(|| format!("Failed to lock store: {}", self.path.display()))?;

        let reader = BufReader::new(&file);
        let mut records = HashMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: R = serde_json::from_str(&line).with_context(|| {
                format!(
                    "Failed to parse record at {}:{}",
                    self.path.display(),
                    line_num + 1
                )
            })?;

            records.insert(record.id().clone(), record);
        }

        // Lock released when file is dropped
        Ok(records)
    }

    /// Writes all records to the store (full rewrite)
    pub fn write_all(&self, records: &HashMap<R::Id, R>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to lock store: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);

            // Sort for consistent output
            let mut sorted: Vec<_> = records.values().collect();
            sorted.sort_by_key(|r| r.sort_key());

            for record in sorted {
                let line = serde_json::to_string(record).context("Failed to serialize record")?;
                writeln!(writer, "{}", line).context("Failed to write record")?;
            }

            writer.flush().context("Failed to flush store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Role};
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_staff(name: &str) -> Staff {
        Staff::new(name, "Tester", Role::Staff, Gender::Unspecified, Utc::now())
    }

    #[test]
    fn read_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<Staff> = RecordStore::in_dir(dir.path());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn write_and_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<Staff> = RecordStore::in_dir(dir.path());

        let a = make_staff("Ada");
        let b = make_staff("Bea");
        let mut records = HashMap::new();
        records.insert(a.id.clone(), a.clone());
        records.insert(b.id.clone(), b.clone());

        store.write_all(&records).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(&a.id).unwrap().first_name, "Ada");
    }

    #[test]
    fn duplicate_lines_collapse_on_read() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<Staff> = RecordStore::in_dir(dir.path());

        let staff = make_staff("Ada");
        let line = serde_json::to_string(&staff).unwrap();
        fs::write(store.path(), format!("{}\n{}\n", line, line)).unwrap();

        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<Staff> = RecordStore::in_dir(dir.path());

        let staff = make_staff("Ada");
        let mut records = HashMap::new();
        records.insert(staff.id.clone(), staff);
        store.write_all(&records).unwrap();

        assert!(!store.path().with_extension("jsonl.tmp").exists());
        assert!(store.path().exists());
    }
}
