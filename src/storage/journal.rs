//! SQLite journal: audit log and notification outbox
//!
//! The journal sits in `.rota/journal.db` and receives the effects engine
//! operations emit. It is strictly downstream of the JSONL stores:
//! effects are dispatched after the state write commits, and a journal
//! failure never rolls back the transition it describes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AuditAction, Effect, NotificationKind, StaffId};

/// One row of the audit log
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuditRow {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub actor_id: Option<String>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// One queued notification
#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Append-only journal backed by SQLite
pub struct Journal {
    db_path: PathBuf,
    conn: Connection,
}

impl Journal {
    /// Schema version - bump when schema changes to force rebuild
    const SCHEMA_VERSION: i32 = 1;

    /// Creates or opens the journal for a project
    pub fn open(project_root: &Path) -> Result<Self> {
        let rota_dir = project_root.join(".rota");
        fs::create_dir_all(&rota_dir)
            .with_context(|| format!("Failed to create directory: {}", rota_dir.display()))?;
        let db_path = rota_dir.join("journal.db");

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open journal: {}", db_path.display()))?;

        // WAL keeps sweep and command processes from blocking each other
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let mut journal = Self { db_path, conn };
        journal.ensure_schema()?;

        Ok(journal)
    }

    /// Returns the path to the journal database
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn ensure_schema(&mut self) -> Result<()> {
        let current: Option<i32> = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .optional()?;

        if current.unwrap_or(0) != Self::SCHEMA_VERSION {
            self.create_schema()?;
        }

        Ok(())
    }

    fn create_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            DROP TABLE IF EXISTS audit_log;
            DROP TABLE IF EXISTS notifications;

            CREATE TABLE audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entity_type TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                action TEXT NOT NULL,
                actor_id TEXT,
                before_json TEXT,
                after_json TEXT,
                metadata_json TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX idx_audit_entity ON audit_log(entity_type, entity_id);

            CREATE TABLE notifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                data_json TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX idx_notifications_user ON notifications(user_id);
            ",
        )?;

        self.conn
            .execute_batch(&format!("PRAGMA user_version = {}", Self::SCHEMA_VERSION))?;

        Ok(())
    }

    /// Records one audit row
    pub fn record(
        &self,
        entity_id: &str,
        action: AuditAction,
        actor_id: Option<&StaffId>,
        before: Option<&serde_json::Value>,
        after: Option<&serde_json::Value>,
        metadata: Option<&serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO audit_log
                (entity_type, entity_id, action, actor_id, before_json, after_json, metadata_json, created_at)
             VALUES ('ASSIGNMENT', ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entity_id,
                action.as_str(),
                actor_id.map(|a| a.to_string()),
                before.map(|v| v.to_string()),
                after.map(|v| v.to_string()),
                metadata.map(|v| v.to_string()),
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Queues one notification
    pub fn notify(
        &self,
        user_id: &StaffId,
        kind: NotificationKind,
        title: &str,
        body: &str,
        data: Option<&serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO notifications (user_id, kind, title, body, data_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id.to_string(),
                kind.as_str(),
                title,
                body,
                data.map(|v| v.to_string()),
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Dispatches a batch of effects, best-effort.
    ///
    /// Returns the number of effects that failed; failures are reported
    /// to stderr and never propagate.
    pub fn dispatch(&self, effects: &[Effect], now: DateTime<Utc>) -> usize {
        let mut failed = 0;
        for effect in effects {
            let result = match effect {
                Effect::Audit {
                    entity_id,
                    action,
                    actor_id,
                    before,
                    after,
                    metadata,
                } => self.record(
                    entity_id,
                    *action,
                    actor_id.as_ref(),
                    before.as_ref(),
                    after.as_ref(),
                    metadata.as_ref(),
                    now,
                ),
                Effect::Notify {
                    user_id,
                    kind,
                    title,
                    body,
                    data,
                } => self.notify(user_id, *kind, title, body, data.as_ref(), now),
            };

            if let Err(e) = result {
                eprintln!("Warning: failed to journal effect: {:#}", e);
                failed += 1;
            }
        }
        failed
    }

    /// Audit rows for one assignment, oldest first
    pub fn audit_for(&self, entity_id: &str) -> Result<Vec<AuditRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, entity_type, entity_id, action, actor_id,
                    before_json, after_json, metadata_json, created_at
             FROM audit_log WHERE entity_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![entity_id], Self::audit_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All audit rows, newest first
    pub fn audit_all(&self, limit: u32) -> Result<Vec<AuditRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, entity_type, entity_id, action, actor_id,
                    before_json, after_json, metadata_json, created_at
             FROM audit_log ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], Self::audit_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Notifications for one user, newest first
    pub fn notifications_for(&self, user_id: &StaffId) -> Result<Vec<NotificationRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, kind, title, body, data_json, created_at
             FROM notifications WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt
            .query_map(params![user_id.to_string()], Self::notification_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn audit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditRow> {
        Ok(AuditRow {
            id: row.get(0)?,
            entity_type: row.get(1)?,
            entity_id: row.get(2)?,
            action: row.get(3)?,
            actor_id: row.get(4)?,
            before: parse_json(row.get::<_, Option<String>>(5)?),
            after: parse_json(row.get::<_, Option<String>>(6)?),
            metadata: parse_json(row.get::<_, Option<String>>(7)?),
            created_at: parse_instant(row.get::<_, String>(8)?),
        })
    }

    fn notification_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NotificationRow> {
        Ok(NotificationRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind: row.get(2)?,
            title: row.get(3)?,
            body: row.get(4)?,
            data: parse_json(row.get::<_, Option<String>>(5)?),
            created_at: parse_instant(row.get::<_, String>(6)?),
        })
    }
}

fn parse_json(value: Option<String>) -> Option<serde_json::Value> {
    value.and_then(|v| serde_json::from_str(&v).ok())
}

fn parse_instant(value: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
