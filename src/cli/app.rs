//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{
    application_cmd, assign, house, journal_cmd, shift_cmd, staff_cmd, sweep, template_cmd,
    week_cmd,
};
use crate::storage::Project;

#[derive(Parser)]
#[command(name = "rota")]
#[command(author, version, about = "Local-first staff rota and shift assignments")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new rota project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage houses (physical sites)
    #[command(subcommand)]
    House(house::HouseCommands),

    /// Manage the staff directory
    #[command(subcommand)]
    Staff(staff_cmd::StaffCommands),

    /// Manage shifts
    #[command(subcommand)]
    Shift(shift_cmd::ShiftCommands),

    /// Manage assignments (create, accept, reject, …)
    #[command(subcommand)]
    Assign(assign::AssignCommands),

    /// Apply for shifts and decide applications
    #[command(subcommand)]
    Application(application_cmd::ApplicationCommands),

    /// Weekly rota views and week copying
    #[command(subcommand)]
    Week(week_cmd::WeekCommands),

    /// Reusable week templates
    #[command(subcommand)]
    Template(template_cmd::TemplateCommands),

    /// Expire overdue pending assignments
    Sweep {
        /// Keep running, sweeping at the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// Inspect the audit log and notification outbox
    #[command(subcommand)]
    Journal(journal_cmd::JournalCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.success(&format!(
                "Initialized rota project at {}",
                project.root().display()
            ));
            Ok(())
        }

        Commands::House(cmd) => house::run(cmd, &output),
        Commands::Staff(cmd) => staff_cmd::run(cmd, &output),
        Commands::Shift(cmd) => shift_cmd::run(cmd, &output),
        Commands::Assign(cmd) => assign::run(cmd, &output),
        Commands::Application(cmd) => application_cmd::run(cmd, &output),
        Commands::Week(cmd) => week_cmd::run(cmd, &output),
        Commands::Template(cmd) => template_cmd::run(cmd, &output),
        Commands::Sweep { watch } => sweep::run(watch, &output),
        Commands::Journal(cmd) => journal_cmd::run(cmd, &output),
    }
}
