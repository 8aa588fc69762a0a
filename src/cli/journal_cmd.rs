//! Journal inspection commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::StaffId;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Show audit log entries, newest first
    Audit {
        /// Restrict to one entity (e.g. an assignment ID)
        #[arg(long)]
        entity: Option<String>,

        /// Maximum rows to show
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Show queued notifications for a user
    Notifications {
        /// Staff ID (u-…)
        user: StaffId,
    },
}

pub fn run(cmd: JournalCommands, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let journal = project.journal()?;

    match cmd {
        JournalCommands::Audit { entity, limit } => {
            let rows = match entity {
                Some(entity) => journal.audit_for(&entity)?,
                None => journal.audit_all(limit)?,
            };

            if output.is_json() {
                output.data(&rows);
            } else {
                output.row(&["TIME", "ACTION", "ENTITY", "ACTOR"]);
                for row in &rows {
                    output.row(&[
                        &row.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                        &row.action,
                        &row.entity_id,
                        row.actor_id.as_deref().unwrap_or("-"),
                    ]);
                }
            }
            Ok(())
        }

        JournalCommands::Notifications { user } => {
            let rows = journal.notifications_for(&user)?;

            if output.is_json() {
                output.data(&rows);
            } else if rows.is_empty() {
                output.success("No notifications");
            } else {
                for row in &rows {
                    output.row(&[
                        &row.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        &row.kind,
                        &row.title,
                        &row.body,
                    ]);
                }
            }
            Ok(())
        }
    }
}
