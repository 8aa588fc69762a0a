//! Week template commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::time;
use crate::domain::{StaffId, TemplateId};
use crate::engine::template_ops;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Snapshot a week's shifts into a named template
    Create {
        /// Template name
        name: String,

        /// Source week start, a Monday (YYYY-MM-DD)
        #[arg(long)]
        week: String,

        /// Acting staff ID, recorded as the template creator
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// Materialize a template into a week
    Apply {
        /// Template ID (p-…)
        id: TemplateId,

        /// Target week start, a Monday (YYYY-MM-DD)
        #[arg(long)]
        week: String,

        /// Acting staff ID, recorded as last editor on the new shifts
        #[arg(long, env = "ROTA_ACTOR")]
        actor: StaffId,
    },

    /// List templates
    List,
}

pub fn run(cmd: TemplateCommands, output: &Output) -> Result<()> {
    match cmd {
        TemplateCommands::Create { name, week, actor } => {
            let week_start = time::parse_date(&week)?;

            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let template = template_ops::create_from_week(
                &mut ws.snapshot,
                &name,
                week_start,
                &actor,
                Utc::now(),
            )?;
            ws.commit()?;

            output.success(&format!(
                "Created template {} ({}) with {} shifts",
                template.name,
                template.id,
                template.items.len()
            ));
            Ok(())
        }

        TemplateCommands::Apply { id, week, actor } => {
            let week_start = time::parse_date(&week)?;

            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let created =
                template_ops::apply(&mut ws.snapshot, &id, week_start, &actor, Utc::now())?;
            ws.commit()?;

            output.success(&format!(
                "Applied template: {} shifts created in week starting {}",
                created.len(),
                week_start
            ));
            Ok(())
        }

        TemplateCommands::List => {
            let project = Project::open_current()?;
            let snapshot = project.load()?;

            let mut templates: Vec<_> = snapshot.templates.values().collect();
            templates.sort_by(|a, b| a.name.cmp(&b.name));

            if output.is_json() {
                output.data(&templates);
            } else {
                output.row(&["ID", "NAME", "SHIFTS", "CREATED"]);
                for t in templates {
                    output.row(&[
                        &t.id.to_string(),
                        &t.name,
                        &t.items.len().to_string(),
                        &t.created_at.format("%Y-%m-%d").to_string(),
                    ]);
                }
            }
            Ok(())
        }
    }
}
