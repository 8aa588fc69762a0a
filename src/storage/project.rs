//! Project management
//!
//! Handles `.rota/` initialization and provides locked access to the
//! record stores. Every mutating command runs inside a [`Workspace`]:
//! an exclusive lock over the whole project, a fresh load of all
//! records, the engine operation, and a write-back — which is what
//! closes the check-then-act races between concurrent commands and the
//! sweeper.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::{Assignment, House, Shift, ShiftApplication, ShiftTemplate, Staff};
use crate::engine::Snapshot;

use super::config::{Config, DEFAULT_CONFIG};
use super::journal::Journal;
use super::records::RecordStore;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a rota project. Run 'rota init' first.")]
    NotInProject,

    #[error("Failed to lock project: {0}")]
    LockFailed(String),
}

/// A rota project rooted at a directory containing `.rota/`
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let rota_dir = root.join(".rota");

        if !rota_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;
        Self::open(root)
    }

    /// Initializes a new project at the given path (idempotent)
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let rota_dir = root.join(".rota");

        fs::create_dir_all(&rota_dir)
            .with_context(|| format!("Failed to create .rota directory: {}", rota_dir.display()))?;

        let config_path = rota_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = rota_dir.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, "journal.db*\nlock\n")
                .with_context(|| format!("Failed to write: {}", gitignore_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.rota` directory path
    pub fn rota_dir(&self) -> PathBuf {
        self.root.join(".rota")
    }

    /// Returns the project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Opens the journal for this project
    pub fn journal(&self) -> Result<Journal> {
        Journal::open(&self.root)
    }

    fn store<R: super::records::Record>(&self) -> RecordStore<R> {
        RecordStore::in_dir(&self.rota_dir())
    }

    /// Loads all records into a snapshot (read-only, no lock held after
    /// the return)
    pub fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            houses: self.store::<House>().read_all()?,
            staff: self.store::<Staff>().read_all()?,
            shifts: self.store::<Shift>().read_all()?,
            assignments: self.store::<Assignment>().read_all()?,
            templates: self.store::<ShiftTemplate>().read_all()?,
            applications: self.store::<ShiftApplication>().read_all()?,
        })
    }

    /// Acquires the exclusive workspace lock and loads a fresh snapshot.
    ///
    /// The lock is held until the returned [`Workspace`] is dropped;
    /// call [`Workspace::commit`] to write the snapshot back first.
    pub fn begin(&self) -> Result<Workspace<'_>> {
        let lock_path = self.rota_dir().join("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| ProjectError::LockFailed(e.to_string()))?;

        // Re-read under the lock so validation sees committed state
        let snapshot = self.load()?;

        Ok(Workspace {
            project: self,
            snapshot,
            _lock: lock_file,
        })
    }
}

/// An exclusive, re-validated view of the project's records
pub struct Workspace<'a> {
    project: &'a Project,
    pub snapshot: Snapshot,
    _lock: std::fs::File,
}

impl Workspace<'_> {
    /// Writes every store back and releases the lock
    pub fn commit(self) -> Result<()> {
        let dir = self.project.rota_dir();
        RecordStore::<House>::in_dir(&dir).write_all(&self.snapshot.houses)?;
        RecordStore::<Staff>::in_dir(&dir).write_all(&self.snapshot.staff)?;
        RecordStore::<Shift>::in_dir(&dir).write_all(&self.snapshot.shifts)?;
        RecordStore::<Assignment>::in_dir(&dir).write_all(&self.snapshot.assignments)?;
        RecordStore::<ShiftTemplate>::in_dir(&dir).write_all(&self.snapshot.templates)?;
        RecordStore::<ShiftApplication>::in_dir(&dir).write_all(&self.snapshot.applications)?;
        Ok(())
        // Lock released when the file handle drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Role};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.rota_dir().is_dir());
        assert!(project.rota_dir().join("config.toml").is_file());
        assert!(project.rota_dir().join(".gitignore").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap();
    }

    #[test]
    fn open_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn workspace_commit_roundtrips_records() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let staff = Staff::new("Ada", "Lovelace", Role::Staff, Gender::Female, Utc::now());
        let staff_id = staff.id.clone();

        let mut ws = project.begin().unwrap();
        ws.snapshot.staff.insert(staff_id.clone(), staff);
        ws.commit().unwrap();

        let loaded = project.load().unwrap();
        assert_eq!(loaded.staff.len(), 1);
        assert!(loaded.staff.contains_key(&staff_id));
    }

    #[test]
    fn uncommitted_workspace_changes_are_dropped() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        {
            let mut ws = project.begin().unwrap();
            let staff = Staff::new("Ada", "Lovelace", Role::Staff, Gender::Female, Utc::now());
            ws.snapshot.staff.insert(staff.id.clone(), staff);
            // Dropped without commit
        }

        assert!(project.load().unwrap().staff.is_empty());
    }
}
