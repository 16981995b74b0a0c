//! Michi CLI Application
//!
//! Command-line interface and MCP server for the Michi trip learning
//! planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, MichiMcpServer};
use michi_core::PlannerBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_user(user)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Michi started");

    match command {
        Some(Trip { command }) => {
            Cli::new(planner, renderer)
                .handle_trip_command(command)
                .await
        }
        Some(Schedule { command }) => {
            Cli::new(planner, renderer)
                .handle_schedule_command(command)
                .await
        }
        Some(Profile { command }) => {
            Cli::new(planner, renderer)
                .handle_profile_command(command)
                .await
        }
        Some(Prompt { command }) => {
            Cli::new(planner, renderer)
                .handle_prompt_command(command)
                .await
        }
        Some(Drafts { command }) => {
            Cli::new(planner, renderer)
                .handle_draft_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Michi MCP server");
            run_stdio_server(MichiMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_trips().await,
    }
}
