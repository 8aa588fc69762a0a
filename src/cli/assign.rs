//! Assignment lifecycle commands
//!
//! `create` and `update` act as the scheduler (`--actor`); `accept` and
//! `reject` act as the assigned staff member themselves.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{AssignmentId, AssignmentStatus, ShiftId, StaffId};
use crate::engine::assignment_ops::{self, CreateAssignment, UpdateAssignment};
use crate::engine::conflict::OverrideRequest;
use crate::engine::EngineError;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum AssignCommands {
    /// Assign a staff member to a shift (pending until accepted)
    Create {
        /// Shift ID (s-…)
        #[arg(long)]
        shift: ShiftId,

        /// Staff ID (u-…)
        #[arg(long)]
        staff: StaffId,

        /// Acting staff ID (the scheduler proposing the assignment)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,

        /// Exceed the daily assignment cap (requires --reason)
        #[arg(long = "override")]
        allow_override: bool,

        /// Reason recorded in the audit log when overriding
        #[arg(long)]
        reason: Option<String>,

        /// Skip the pending window and create directly accepted
        #[arg(long)]
        auto_accept: bool,
    },

    /// Move an assignment to a different shift and/or staff member
    Update {
        /// Assignment ID (g-…)
        id: AssignmentId,

        /// New shift ID
        #[arg(long)]
        shift: Option<ShiftId>,

        /// New staff ID
        #[arg(long)]
        staff: Option<StaffId>,

        /// Acting staff ID
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,

        /// Exceed the daily assignment cap (requires --reason)
        #[arg(long = "override")]
        allow_override: bool,

        /// Reason recorded in the audit log when overriding
        #[arg(long)]
        reason: Option<String>,
    },

    /// Remove an assignment entirely
    Remove {
        /// Assignment ID (g-…)
        id: AssignmentId,

        /// Acting staff ID
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// Accept a pending assignment (as the assigned staff member)
    Accept {
        /// Assignment ID (g-…)
        id: AssignmentId,

        /// Acting staff ID (must be the assigned staff member)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// Reject a pending assignment (as the assigned staff member)
    Reject {
        /// Assignment ID (g-…)
        id: AssignmentId,

        /// Acting staff ID (must be the assigned staff member)
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// List assignments
    List {
        /// Restrict to one shift
        #[arg(long)]
        shift: Option<ShiftId>,

        /// Restrict to one staff member
        #[arg(long)]
        staff: Option<StaffId>,

        /// Restrict to one status: pending, accepted, rejected, expired
        #[arg(long)]
        status: Option<String>,
    },
}

pub fn run(cmd: AssignCommands, output: &Output) -> Result<()> {
    match cmd {
        AssignCommands::Create {
            shift,
            staff,
            actor,
            allow_override,
            reason,
            auto_accept,
        } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            let (assignment, effects) = assignment_ops::create(
                &mut ws.snapshot,
                CreateAssignment {
                    shift_id: shift,
                    staff_id: staff,
                    override_request: OverrideRequest::new(allow_override, reason),
                    auto_accept,
                },
                &actor,
                project.config().pending_for(),
                now,
            )?;
            ws.commit()?;
            super::dispatch_effects(&project, &effects, now, output)?;

            if output.is_json() {
                output.data(&assignment);
            } else {
                match assignment.expires_at {
                    Some(at) => output.success(&format!(
                        "Created {} assignment {} (expires {})",
                        assignment.status.as_str(),
                        assignment.id,
                        at.format("%Y-%m-%d %H:%M UTC"),
                    )),
                    None => output.success(&format!(
                        "Created {} assignment {}",
                        assignment.status.as_str(),
                        assignment.id,
                    )),
                }
            }
            Ok(())
        }

        AssignCommands::Update {
            id,
            shift,
            staff,
            actor,
            allow_override,
            reason,
        } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            let (assignment, effects) = assignment_ops::update(
                &mut ws.snapshot,
                UpdateAssignment {
                    id,
                    shift_id: shift,
                    staff_id: staff,
                    override_request: OverrideRequest::new(allow_override, reason),
                },
                &actor,
                project.config().pending_for(),
                now,
            )?;
            ws.commit()?;
            super::dispatch_effects(&project, &effects, now, output)?;

            if output.is_json() {
                output.data(&assignment);
            } else if effects.is_empty() {
                output.success(&format!("Assignment {} unchanged", assignment.id));
            } else {
                output.success(&format!(
                    "Updated assignment {} (now {})",
                    assignment.id,
                    assignment.status.as_str()
                ));
            }
            Ok(())
        }

        AssignCommands::Remove { id, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            let (removed, effects) = assignment_ops::remove(&mut ws.snapshot, &id, &actor)?;
            ws.commit()?;
            super::dispatch_effects(&project, &effects, now, output)?;

            output.success(&format!("Removed assignment {}", removed.id));
            Ok(())
        }

        AssignCommands::Accept { id, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            match assignment_ops::accept(&mut ws.snapshot, &id, &actor, now) {
                Ok((assignment, effects)) => {
                    ws.commit()?;
                    super::dispatch_effects(&project, &effects, now, output)?;
                    output.success(&format!("Accepted assignment {}", assignment.id));
                    Ok(())
                }
                // A late accept already flipped the row to expired;
                // persist that before reporting the failure.
                Err(e @ EngineError::AssignmentExpired) => {
                    ws.commit()?;
                    Err(e.into())
                }
                Err(e) => Err(e.into()),
            }
        }

        AssignCommands::Reject { id, actor } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;
            let now = Utc::now();

            match assignment_ops::reject(&mut ws.snapshot, &id, &actor, now) {
                Ok((assignment, effects)) => {
                    ws.commit()?;
                    super::dispatch_effects(&project, &effects, now, output)?;
                    output.success(&format!("Rejected assignment {}", assignment.id));
                    Ok(())
                }
                // Same late-response handling as accept: the row is
                // already expired, persist that before failing.
                Err(e @ EngineError::AssignmentExpired) => {
                    ws.commit()?;
                    Err(e.into())
                }
                Err(e) => Err(e.into()),
            }
        }

        AssignCommands::List {
            shift,
            staff,
            status,
        } => {
            let status = status
                .map(|s| parse_status(&s))
                .transpose()
                .map_err(anyhow::Error::msg)?;

            let project = Project::open_current()?;
            let snapshot = project.load()?;

            let mut assignments: Vec<_> = snapshot
                .assignments
                .values()
                .filter(|a| shift.as_ref().map_or(true, |s| &a.shift_id == s))
                .filter(|a| staff.as_ref().map_or(true, |s| &a.staff_id == s))
                .filter(|a| status.map_or(true, |s| a.status == s))
                .collect();
            assignments.sort_by_key(|a| (a.created_at, a.id.clone()));

            if output.is_json() {
                output.data(&assignments);
            } else {
                output.row(&["ID", "SHIFT", "STAFF", "STATUS", "EXPIRES"]);
                for a in assignments {
                    let expires = a
                        .expires_at
                        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    output.row(&[
                        &a.id.to_string(),
                        &a.shift_id.to_string(),
                        &a.staff_id.to_string(),
                        a.status.as_str(),
                        &expires,
                    ]);
                }
            }
            Ok(())
        }
    }
}

fn parse_status(value: &str) -> Result<AssignmentStatus, String> {
    match value.to_ascii_lowercase().as_str() {
        "pending" => Ok(AssignmentStatus::Pending),
        "accepted" => Ok(AssignmentStatus::Accepted),
        "rejected" => Ok(AssignmentStatus::Rejected),
        "expired" => Ok(AssignmentStatus::Expired),
        other => Err(format!(
            "unknown status '{}' (expected pending, accepted, rejected, or expired)",
            other
        )),
    }
}
