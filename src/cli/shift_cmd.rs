//! Shift commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::time::{self, TimeOfDay};
use crate::domain::{HouseId, Shift, ShiftType, StaffId};
use crate::engine::week;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum ShiftCommands {
    /// Add a shift at a house
    Add {
        /// House ID (h-…)
        #[arg(long)]
        house: HouseId,

        /// Calendar day the shift starts on (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM); at or before the start means the shift
        /// ends the next day
        #[arg(long)]
        end: String,

        /// Shift type: day, night, or sleepin
        #[arg(long = "type", default_value = "day")]
        shift_type: ShiftType,

        /// Number of staff the shift needs
        #[arg(long, default_value = "1")]
        required: u32,

        /// Optional display name
        #[arg(long)]
        name: Option<String>,

        /// Acting staff ID, recorded as last editor
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// List shifts in a date window
    List {
        /// Restrict to one house
        #[arg(long)]
        house: Option<HouseId>,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Window end, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// List shifts whose accepted assignments have not filled the
    /// required staff count
    Open {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Window end, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

pub fn run(cmd: ShiftCommands, output: &Output) -> Result<()> {
    match cmd {
        ShiftCommands::Add {
            house,
            date,
            start,
            end,
            shift_type,
            required,
            name,
            actor,
        } => {
            let date = time::parse_date(&date)?;
            let start = TimeOfDay::parse(&start)?;
            let end = TimeOfDay::parse(&end)?;

            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            // Validate the references before writing anything
            ws.snapshot.house(&house)?;
            ws.snapshot.staff(&actor)?;

            let now = Utc::now();
            let mut shift = Shift::new(house, date, start, end, shift_type, required, name, now);
            shift.touch(actor, now);
            let id = shift.id.clone();
            let label = shift.label();
            let overnight = shift.ends_next_day();

            ws.snapshot.shifts.insert(id.clone(), shift);
            ws.commit()?;

            output.success(&format!(
                "Added {} ({}){}",
                label,
                id,
                if overnight { ", ends next day" } else { "" }
            ));
            Ok(())
        }

        ShiftCommands::List { house, from, to } => {
            let (from, to) =
                time::date_range(time::parse_date(&from)?, time::parse_date(&to)?)?;

            let project = Project::open_current()?;
            let snapshot = project.load()?;
            let shifts = snapshot.shifts_in_range(house.as_ref(), from, to);

            if output.is_json() {
                output.data(&shifts);
            } else {
                output.row(&["ID", "DATE", "TIME", "TYPE", "STAFF", "NAME"]);
                for shift in shifts {
                    let time_col = format!(
                        "{}-{}{}",
                        shift.start_time,
                        shift.end_time,
                        if shift.ends_next_day() { "+1" } else { "" }
                    );
                    output.row(&[
                        &shift.id.to_string(),
                        &shift.date.to_string(),
                        &time_col,
                        shift.shift_type.as_str(),
                        &shift.required_staff.to_string(),
                        shift.name.as_deref().unwrap_or("-"),
                    ]);
                }
            }
            Ok(())
        }

        ShiftCommands::Open { from, to } => {
            let from = time::parse_date(&from)?;
            let to = time::parse_date(&to)?;

            let project = Project::open_current()?;
            let snapshot = project.load()?;
            let open = week::open_shifts(&snapshot, from, to)?;

            if output.is_json() {
                output.data(&open);
            } else if open.is_empty() {
                output.success("No open shifts in window");
            } else {
                output.row(&["ID", "DATE", "TIME", "FILLED", "OPEN"]);
                for o in &open {
                    let time_col = format!("{}-{}", o.shift.start_time, o.shift.end_time);
                    output.row(&[
                        &o.shift.id.to_string(),
                        &o.shift.date.to_string(),
                        &time_col,
                        &format!("{}/{}", o.assigned_count, o.shift.required_staff),
                        &o.open_slots.to_string(),
                    ]);
                }
            }
            Ok(())
        }
    }
}
