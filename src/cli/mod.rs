//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init` |
//! | Directory | Houses and staff | `house add`, `staff add`, `staff deactivate` |
//! | Shifts | Shift scheduling | `shift add`, `shift list`, `shift open` |
//! | Assignments | The assignment lifecycle | `assign create`, `assign accept`, `assign reject` |
//! | Applications | Staff-initiated requests | `application apply`, `application approve` |
//! | Rota | Weekly views and templates | `week show`, `week copy`, `template apply` |
//! | Maintenance | Expiry sweeping, journal | `sweep`, `journal audit` |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. Use `--verbose` for debug
//! output on stderr.
//!
//! ## Acting user
//!
//! Mutating commands take `--actor <staff-id>` (or `$ROTA_ACTOR`): the
//! scheduler proposing the change, or the staff member responding.

mod app;
mod application_cmd;
mod assign;
mod house;
mod journal_cmd;
mod output;
mod shift_cmd;
mod staff_cmd;
mod sweep;
mod template_cmd;
mod week_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::Effect;
use crate::storage::Project;

/// Dispatches effects to the journal after a successful commit.
///
/// Best-effort by design: journal failures are reported but never fail
/// the command whose transition already committed.
pub(crate) fn dispatch_effects(
    project: &Project,
    effects: &[Effect],
    now: DateTime<Utc>,
    output: &Output,
) -> Result<()> {
    if effects.is_empty() {
        return Ok(());
    }

    match project.journal() {
        Ok(journal) => {
            let failed = journal.dispatch(effects, now);
            output.verbose_ctx(
                "journal",
                &format!("dispatched {} effects, {} failed", effects.len(), failed),
            );
        }
        Err(e) => {
            eprintln!("Warning: journal unavailable, effects dropped: {:#}", e);
        }
    }

    Ok(())
}
