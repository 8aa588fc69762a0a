//! # Storage Layer
//!
//! Persistence for rota projects with git-friendly file formats.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Houses, staff, shifts, assignments, templates | JSONL (one JSON per line) | `.rota/{name}.jsonl` |
//! | Config | TOML | `.rota/config.toml` |
//! | Audit log + notifications | SQLite | `.rota/journal.db` |
//!
//! ## Concurrency Safety
//!
//! - Mutating commands run inside a [`Workspace`]: an exclusive `fs2`
//!   lock over `.rota/lock`, a fresh load of every store, the engine
//!   operation, and a write-back. That re-read under the lock closes
//!   the check-then-act races between concurrent commands and the
//!   sweeper.
//! - Individual store files additionally take shared/exclusive locks,
//!   and all writes are atomic (temp file + rename).
//! - The journal is written only after a commit succeeds, best-effort.
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a rota project
//! - [`Workspace`] - Locked load-mutate-commit cycle
//! - [`RecordStore`] - Read/write one record type as JSONL
//! - [`Journal`] - Audit log and notification outbox
//! - [`Config`] - Project and global configuration

mod config;
mod journal;
mod project;
mod records;

pub use config::{Config, ConfigError, DEFAULT_CONFIG};
pub use journal::{AuditRow, Journal, NotificationRow};
pub use project::{Project, ProjectError, Workspace};
pub use records::{Record, RecordStore};
