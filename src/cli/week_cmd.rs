//! Weekly rota commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::time;
use crate::domain::StaffId;
use crate::engine::week;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum WeekCommands {
    /// Show the rota for a week (date must be a Monday)
    Show {
        /// Week start, a Monday (YYYY-MM-DD)
        date: String,
    },

    /// Copy every shift from one week into another (never assignments)
    Copy {
        /// Source week start, a Monday (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Target week start, a Monday (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Acting staff ID, recorded as last editor on the copies
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },
}

pub fn run(cmd: WeekCommands, output: &Output) -> Result<()> {
    match cmd {
        WeekCommands::Show { date } => {
            let week_start = time::parse_date(&date)?;

            let project = Project::open_current()?;
            let snapshot = project.load()?;
            let view = week::week_view(&snapshot, week_start)?;

            if output.is_json() {
                output.data(&view);
                return Ok(());
            }

            output.success(&format!(
                "Week {} to {}",
                view.week_start, view.week_end
            ));
            for house in &view.houses {
                output.blank();
                output.success(&format!("{} ({})", house.name, house.id));
                if house.shifts.is_empty() {
                    output.row(&["  (no shifts)"]);
                    continue;
                }
                for shift in &house.shifts {
                    let time_col = format!(
                        "{}-{}{}",
                        shift.start_time,
                        shift.end_time,
                        if shift.ends_next_day { "+1" } else { "" }
                    );
                    let who = if shift.assignments.is_empty() {
                        "unassigned".to_string()
                    } else {
                        shift
                            .assignments
                            .iter()
                            .map(|a| format!("{} ({})", a.staff_name, a.status.as_str()))
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    output.row(&[
                        &format!("  {}", shift.date),
                        &time_col,
                        shift.shift_type.as_str(),
                        &who,
                    ]);
                }
            }
            Ok(())
        }

        WeekCommands::Copy { from, to, actor } => {
            let from = time::parse_date(&from)?;
            let to = time::parse_date(&to)?;

            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let created = week::copy_week(&mut ws.snapshot, from, to, &actor, Utc::now())?;
            ws.commit()?;

            output.success(&format!(
                "Copied {} shifts into week starting {}",
                created.len(),
                to
            ));
            Ok(())
        }
    }
}
