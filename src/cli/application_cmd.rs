//! Shift application commands
//!
//! `apply` acts as the applying staff member (`--actor`); `approve` and
//! `reject` act as the deciding scheduler.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::time;
use crate::domain::{ApplicationId, ShiftId, StaffId};
use crate::engine::application_ops;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum ApplicationCommands {
    /// Apply to work a shift (as a staff member)
    Apply {
        /// Shift ID (s-…)
        #[arg(long)]
        shift: ShiftId,

        /// Acting staff ID (the applicant)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// Approve an application, creating an accepted assignment
    Approve {
        /// Application ID (a-…)
        id: ApplicationId,

        /// Acting staff ID (the deciding scheduler)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// Reject an application
    Reject {
        /// Application ID (a-…)
        id: ApplicationId,

        /// Acting staff ID (the deciding scheduler)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// List applications for the 7 days starting at a date
    List {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        week: String,
    },
}

pub fn run(cmd: ApplicationCommands, output: &Output) -> Result<()> {
    match cmd {
        ApplicationCommands::Apply { shift, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let application =
                application_ops::apply(&mut ws.snapshot, shift, actor, Utc::now())?;
            ws.commit()?;

            output.success(&format!("Filed application {}", application.id));
            Ok(())
        }

        ApplicationCommands::Approve { id, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            let (application, assignment, effects) =
                application_ops::approve(&mut ws.snapshot, &id, &actor, now)?;
            ws.commit()?;
            super::dispatch_effects(&project, &effects, now, output)?;

            output.success(&format!(
                "Approved application {} (assignment {})",
                application.id, assignment.id
            ));
            Ok(())
        }

        ApplicationCommands::Reject { id, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            let (application, effects) =
                application_ops::reject(&mut ws.snapshot, &id, &actor, now)?;
            ws.commit()?;
            super::dispatch_effects(&project, &effects, now, output)?;

            output.success(&format!("Rejected application {}", application.id));
            Ok(())
        }

        ApplicationCommands::List { week } => {
            let start = time::parse_date(&week)?;

            let project = Project::open_current()?;
            let snapshot = project.load()?;
            let views = application_ops::list_for_week(&snapshot, start);

            if output.is_json() {
                output.data(&views);
            } else if views.is_empty() {
                output.success("No applications in window");
            } else {
                output.row(&["ID", "DATE", "SHIFT", "APPLICANT", "STATUS"]);
                for v in &views {
                    output.row(&[
                        &v.id.to_string(),
                        &v.shift_date.to_string(),
                        &v.shift_label,
                        &v.staff_name,
                        v.status.as_str(),
                    ]);
                }
            }
            Ok(())
        }
    }
}
