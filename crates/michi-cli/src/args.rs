use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DraftCommands, ProfileCommands, PromptCommands, ScheduleCommands, TripCommands};

/// Plan learning pathways for your trips
///
/// Michi turns a trip (a date range and a base location) into a day-by-day
/// schedule of learning blocks. It can generate a default schedule, build
/// prompts for a generative model, and validate and apply the model's plan.
/// `michi serve` exposes the same operations over MCP (Model Context
/// Protocol) for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "michi")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/michi/michi.db
    #[arg(long, global = true, env = "MICHI_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// User whose trips and profile are used
    #[arg(long, global = true, env = "MICHI_USER")]
    pub user: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Michi CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Generate, edit and apply schedules
    #[command(alias = "s")]
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Show or edit the learner profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Print prompts for a generative model
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },
    /// Pick pathway drafts from a model response
    Drafts {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Start the MCP server
    Serve,
}
