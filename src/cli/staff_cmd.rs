//! Staff directory commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Gender, Role, Staff, StaffId};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum StaffCommands {
    /// Add a staff member to the directory
    Add {
        first_name: String,
        last_name: String,

        /// Role: manager, scheduler, or staff
        #[arg(long, default_value = "staff")]
        role: Role,

        /// Gender: female, male, or unspecified
        #[arg(long, default_value = "unspecified")]
        gender: Gender,
    },

    /// List staff members
    List {
        /// Include deactivated staff
        #[arg(long)]
        all: bool,
    },

    /// Deactivate a staff member (keeps their history)
    Deactivate {
        /// Staff ID (u-…)
        id: StaffId,
    },
}

pub fn run(cmd: StaffCommands, output: &Output) -> Result<()> {
    match cmd {
        StaffCommands::Add {
            first_name,
            last_name,
            role,
            gender,
        } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let staff = Staff::new(first_name, last_name, role, gender, Utc::now());
            let id = staff.id.clone();
            let name = staff.name();
            ws.snapshot.staff.insert(id.clone(), staff);
            ws.commit()?;

            output.success(&format!("Added {} {} ({})", role.as_str(), name, id));
            Ok(())
        }

        StaffCommands::List { all } => {
            let project = Project::open_current()?;
            let snapshot = project.load()?;

            let mut staff: Vec<_> = snapshot
                .staff
                .values()
                .filter(|s| all || s.is_active)
                .collect();
            staff.sort_by(|a, b| {
                (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
            });

            if output.is_json() {
                output.data(&staff);
            } else {
                output.row(&["ID", "NAME", "ROLE", "ACTIVE"]);
                for s in staff {
                    output.row(&[
                        &s.id.to_string(),
                        &s.name(),
                        s.role.as_str(),
                        if s.is_active { "yes" } else { "no" },
                    ]);
                }
            }
            Ok(())
        }

        StaffCommands::Deactivate { id } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let staff = ws
                .snapshot
                .staff
                .get_mut(&id)
                .ok_or(crate::engine::EngineError::StaffNotFound)?;
            staff.deactivate(Utc::now());
            let name = staff.name();
            ws.commit()?;

            output.success(&format!("Deactivated {} ({})", name, id));
            Ok(())
        }
    }
}
