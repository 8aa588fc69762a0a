//! House commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::output::Output;
use crate::domain::House;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum HouseCommands {
    /// Add a house to the directory
    Add {
        /// Display name of the house
        name: String,

        /// Street address or location hint
        #[arg(long, default_value = "")]
        location: String,
    },

    /// List all houses
    List,
}

pub fn run(cmd: HouseCommands, output: &Output) -> Result<()> {
    match cmd {
        HouseCommands::Add { name, location } => {
            let project = Project::open_current()?;
            let mut ws = project.begin()?;

            let house = House::new(name, location, Utc::now());
            let id = house.id.clone();
            let name = house.name.clone();
            ws.snapshot.houses.insert(id.clone(), house);
            ws.commit()?;

            output.success(&format!("Added house {} ({})", name, id));
            Ok(())
        }

        HouseCommands::List => {
            let project = Project::open_current()?;
            let snapshot = project.load()?;

            let mut houses: Vec<_> = snapshot.houses.values().collect();
            houses.sort_by(|a, b| a.name.cmp(&b.name));

            if output.is_json() {
                output.data(&houses);
            } else {
                output.row(&["ID", "NAME", "LOCATION"]);
                for house in houses {
                    output.row(&[&house.id.to_string(), &house.name, &house.location]);
                }
            }
            Ok(())
        }
    }
}
