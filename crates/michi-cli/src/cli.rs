//! Command-line argument wrappers and command handlers.
//!
//! Every command has a clap `Args` struct that converts into the matching
//! `michi_core::params` type, so the core parameters stay free of clap
//! attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display wrapper
//! ```
//!
//! Commands that take a model response read it from a file, or from stdin
//! when the path is `-`.

use std::{
    fmt::Write as _,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use michi_core::{
    display::{
        CreateResult, DeleteResult, Drafts, OperationStatus, Prompt, ScheduleBlocks, Trips,
        UpdateResult,
    },
    error::SCHEMA_MISMATCH_MESSAGE,
    models::Track,
    params::*,
    Planner, PlannerError,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Trip commands
// ============================================================================

/// Learning track choices, spelled the way they are stored.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TrackArg {
    /// Fifteen minutes a day
    #[value(name = "15min")]
    FifteenMinutes,
    /// One hour a day
    #[value(name = "60min")]
    SixtyMinutes,
    /// Four hours a day
    #[value(name = "4hrs")]
    FourHours,
    /// A weekly hour budget (needs --weekly-hours)
    Weekly,
}

impl From<TrackArg> for Track {
    fn from(val: TrackArg) -> Self {
        match val {
            TrackArg::FifteenMinutes => Track::FifteenMinutes,
            TrackArg::SixtyMinutes => Track::SixtyMinutes,
            TrackArg::FourHours => Track::FourHours,
            TrackArg::Weekly => Track::Weekly,
        }
    }
}

fn track_string(track: Option<TrackArg>) -> Option<String> {
    track.map(|t| Track::from(t).as_str().to_string())
}

/// Create a new trip
#[derive(Args)]
pub struct CreateTripArgs {
    /// Title of the trip
    pub title: String,
    #[arg(long, help = "First day of the trip (YYYY-MM-DD)")]
    pub start: String,
    #[arg(long, help = "Last day of the trip, inclusive (YYYY-MM-DD)")]
    pub end: String,
    #[arg(short, long, help = "Where you are based during the trip")]
    pub location: String,
    #[arg(short, long, help = "Daily learning budget")]
    pub track: Option<TrackArg>,
    #[arg(long, help = "Hours per week for the weekly track")]
    pub weekly_hours: Option<f64>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            title: val.title,
            start_date: val.start,
            end_date: val.end,
            base_location: val.location,
            track: track_string(val.track),
            weekly_hours: val.weekly_hours,
        }
    }
}

/// Show a trip with its schedule
#[derive(Args)]
pub struct ShowTripArgs {
    #[arg(help = "ID of the trip to show")]
    pub id: String,
}

impl From<ShowTripArgs> for Id {
    fn from(val: ShowTripArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a trip
///
/// Only the given fields change. Dates are checked against each other after
/// the edit, so a trip can be moved by changing both in one call.
#[derive(Args)]
pub struct EditTripArgs {
    #[arg(help = "ID of the trip to edit")]
    pub id: String,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(long, help = "New first day (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(long, help = "New last day (YYYY-MM-DD)")]
    pub end: Option<String>,
    #[arg(short, long, help = "New base location")]
    pub location: Option<String>,
    #[arg(short, long, help = "New learning track")]
    pub track: Option<TrackArg>,
    #[arg(long, help = "New weekly hour budget")]
    pub weekly_hours: Option<f64>,
    #[arg(long, conflicts_with_all = ["track", "weekly_hours"], help = "Remove the learning target")]
    pub clear_target: bool,
}

impl From<EditTripArgs> for UpdateTrip {
    fn from(val: EditTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            title: val.title,
            start_date: val.start,
            end_date: val.end,
            base_location: val.location,
            track: track_string(val.track),
            weekly_hours: val.weekly_hours,
            clear_learning_target: val.clear_target,
        }
    }
}

/// Delete a trip and its whole schedule
#[derive(Args)]
pub struct DeleteTripArgs {
    #[arg(help = "ID of the trip to delete")]
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteTripArgs> for DeleteTrip {
    fn from(val: DeleteTripArgs) -> Self {
        DeleteTrip {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List your trips
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a trip with its schedule
    #[command(alias = "s")]
    Show(ShowTripArgs),
    /// Edit a trip
    #[command(alias = "e")]
    Edit(EditTripArgs),
    /// Delete a trip permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

// ============================================================================
// Schedule commands
// ============================================================================

/// A trip's schedule
#[derive(Args)]
pub struct TripIdArgs {
    #[arg(help = "ID of the trip")]
    pub trip_id: String,
}

impl From<TripIdArgs> for TripId {
    fn from(val: TripIdArgs) -> Self {
        TripId {
            trip_id: val.trip_id,
        }
    }
}

/// Add a manual block to a trip
#[derive(Args)]
pub struct AddBlockArgs {
    #[arg(help = "ID of the trip")]
    pub trip_id: String,
    #[arg(help = "Day of the block (YYYY-MM-DD)")]
    pub date: String,
    #[arg(help = "Start time (HH:MM)")]
    pub start_time: String,
    /// Title of the block
    pub title: String,
    #[arg(short = 'm', long, default_value_t = 60, help = "Length in minutes")]
    pub duration: u32,
    #[arg(short, long, help = "What the block is about")]
    pub description: Option<String>,
    #[arg(short, long, help = "Where it happens")]
    pub location: Option<String>,
    #[arg(short, long, help = "Private notes")]
    pub notes: Option<String>,
}

impl From<AddBlockArgs> for AddBlock {
    fn from(val: AddBlockArgs) -> Self {
        AddBlock {
            trip_id: val.trip_id,
            date: val.date,
            start_time: val.start_time,
            duration: val.duration,
            title: val.title,
            description: val.description,
            location: val.location,
            notes: val.notes,
        }
    }
}

/// Remove a block, manual or generated
#[derive(Args)]
pub struct RemoveBlockArgs {
    #[arg(help = "ID of the block to remove")]
    pub id: String,
}

impl From<RemoveBlockArgs> for Id {
    fn from(val: RemoveBlockArgs) -> Self {
        Id { id: val.id }
    }
}

/// A model response and the dates it was requested for
#[derive(Args)]
pub struct ResponseArgs {
    #[arg(help = "ID of the trip")]
    pub trip_id: String,
    #[arg(help = "File holding the model response, or '-' for stdin")]
    pub response: PathBuf,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Dates the response covers (comma-separated); defaults to every trip day"
    )]
    pub dates: Vec<String>,
}

impl ResponseArgs {
    fn into_parts(self) -> Result<(String, String, Vec<String>)> {
        let response = read_response(&self.response)?;
        Ok((self.trip_id, response, self.dates))
    }
}

/// Attach a place to a block
#[derive(Args)]
pub struct AttachPlaceArgs {
    #[arg(help = "ID of the block")]
    pub block_id: String,
    #[arg(help = "Provider identifier of the place")]
    pub place_id: String,
    #[arg(help = "Name to show for the place")]
    pub name: String,
    #[arg(long, allow_hyphen_values = true, help = "Latitude in decimal degrees")]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true, help = "Longitude in decimal degrees")]
    pub lng: f64,
}

impl From<AttachPlaceArgs> for AttachPlace {
    fn from(val: AttachPlaceArgs) -> Self {
        AttachPlace {
            block_id: val.block_id,
            place_id: val.place_id,
            display_name: val.name,
            lat: val.lat,
            lng: val.lng,
        }
    }
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Show a trip's schedule
    #[command(alias = "s")]
    Show(TripIdArgs),
    /// Replace generated blocks with one learning block per day
    #[command(alias = "g")]
    Generate(TripIdArgs),
    /// Add a manual block
    #[command(alias = "a")]
    Add(AddBlockArgs),
    /// Remove a block
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveBlockArgs),
    /// Validate a model plan and replace generated blocks with it
    ApplyAi(ResponseArgs),
    /// Attach a place to a block
    Place(AttachPlaceArgs),
}

// ============================================================================
// Profile, prompt and draft commands
// ============================================================================

/// Update the learner profile
#[derive(Args)]
pub struct SetProfileArgs {
    #[arg(long, help = "Learner's name")]
    pub name: Option<String>,
    #[arg(long, help = "Learner's age")]
    pub age: Option<u32>,
    #[arg(long, value_delimiter = ',', help = "Interests as a comma-separated list")]
    pub interests: Option<Vec<String>>,
    #[arg(long, help = "How the learner likes to learn")]
    pub learning_style: Option<String>,
    #[arg(long, help = "What the learner wants to get out of the trip")]
    pub goals: Option<String>,
}

impl From<SetProfileArgs> for UpdateProfile {
    fn from(val: SetProfileArgs) -> Self {
        UpdateProfile {
            name: val.name,
            age: val.age,
            interests: val.interests,
            learning_style: val.learning_style,
            goals: val.goals,
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the learner profile
    Show,
    /// Update profile fields
    Set(SetProfileArgs),
}

/// Prompt for some or all days of a trip
#[derive(Args)]
pub struct PromptArgs {
    #[arg(help = "ID of the trip")]
    pub trip_id: String,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Dates to plan (comma-separated); defaults to every trip day"
    )]
    pub dates: Vec<String>,
    #[arg(long, help = "Print the messages as JSON instead of markdown")]
    pub json: bool,
}

impl From<&PromptArgs> for PromptRequest {
    fn from(val: &PromptArgs) -> Self {
        PromptRequest {
            trip_id: val.trip_id.clone(),
            dates: val.dates.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// Prompt for a full project-based learning plan
    Plan(PromptArgs),
    /// Prompt for three headline-only pathway drafts
    Drafts(PromptArgs),
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Pick one continuous, one themed and one hybrid draft from a response
    Select(ResponseArgs),
}

/// Read a model response from `path`, or from stdin when `path` is `-`.
pub fn read_response(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut response = String::new();
        io::stdin()
            .read_to_string(&mut response)
            .context("Failed to read response from stdin")?;
        return Ok(response);
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read response from {}", path.display()))
}

// ============================================================================
// Command handlers
// ============================================================================

/// Runs parsed commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let trip = self.planner.create_trip(&args.into()).await?;
                self.renderer.render(&CreateResult::new(trip).to_string())
            }
            TripCommands::List => self.list_trips().await,
            TripCommands::Show(args) => {
                let params = Id::from(args);
                match self.planner.get_trip(&params).await? {
                    Some(trip) => self.renderer.render(&trip.to_string()),
                    None => bail!("Trip with ID {} not found", params.id),
                }
            }
            TripCommands::Edit(args) => {
                let (trip, changes) = self.planner.update_trip(&args.into()).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(trip, changes).to_string())
            }
            TripCommands::Delete(args) => {
                let params = DeleteTrip::from(args);
                if !params.confirmed {
                    let status = OperationStatus::failure(format!(
                        "Deleting trip {} removes its whole schedule. Re-run with --confirm.",
                        params.id
                    ));
                    self.renderer.render(&status.to_string())?;
                    bail!("Deletion not confirmed");
                }
                let trip = self.planner.delete_trip(&params).await?;
                self.renderer.render(&DeleteResult::new(trip).to_string())
            }
        }
    }

    pub async fn handle_schedule_command(&self, command: ScheduleCommands) -> Result<()> {
        match command {
            ScheduleCommands::Show(args) => {
                let blocks = self.planner.get_schedule(&args.into()).await?;
                self.renderer
                    .render(&format!("# Schedule\n\n{}", ScheduleBlocks(blocks)))
            }
            ScheduleCommands::Generate(args) => {
                let blocks = self.planner.generate_schedule(&args.into()).await?;
                self.renderer.render(&format!(
                    "# Generated schedule\n\n{}",
                    ScheduleBlocks(blocks)
                ))
            }
            ScheduleCommands::Add(args) => {
                let block = self.planner.add_block(&args.into()).await?;
                self.renderer.render(&CreateResult::new(block).to_string())
            }
            ScheduleCommands::Remove(args) => {
                let block = self.planner.remove_block(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(block).to_string())
            }
            ScheduleCommands::ApplyAi(args) => {
                let (trip_id, response, dates) = args.into_parts()?;
                let params = ApplyAiPlan {
                    trip_id,
                    response,
                    dates,
                };
                match self.planner.apply_ai_plan(&params).await {
                    Ok(blocks) => self.renderer.render(&format!(
                        "# Applied AI plan\n\n{}",
                        ScheduleBlocks(blocks)
                    )),
                    Err(error) => self.report_schema_error(error),
                }
            }
            ScheduleCommands::Place(args) => {
                let params = AttachPlace::from(args);
                let block = self.planner.attach_place(&params).await?;
                let change = format!("Place set to '{}'", params.display_name);
                self.renderer
                    .render(&UpdateResult::with_changes(block, vec![change]).to_string())
            }
        }
    }

    pub async fn handle_profile_command(&self, command: ProfileCommands) -> Result<()> {
        match command {
            ProfileCommands::Show => match self.planner.get_profile().await? {
                Some(profile) => self.renderer.render(&profile.to_string()),
                None => self.renderer.render(
                    "No learner profile yet. Create one with `michi profile set --name ...`.\n",
                ),
            },
            ProfileCommands::Set(args) => {
                let (profile, changes) = self.planner.update_profile(&args.into()).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(profile, changes).to_string())
            }
        }
    }

    pub async fn handle_prompt_command(&self, command: PromptCommands) -> Result<()> {
        let (args, messages) = match command {
            PromptCommands::Plan(args) => {
                let messages = self.planner.plan_prompt(&(&args).into()).await?;
                (args, messages)
            }
            PromptCommands::Drafts(args) => {
                let messages = self.planner.drafts_prompt(&(&args).into()).await?;
                (args, messages)
            }
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&messages)?);
            Ok(())
        } else {
            self.renderer.render(&Prompt(messages).to_string())
        }
    }

    pub async fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Select(args) => {
                let (trip_id, response, dates) = args.into_parts()?;
                let params = SelectDrafts {
                    trip_id,
                    response,
                    dates,
                };
                match self.planner.select_drafts(&params).await {
                    Ok(drafts) => self.renderer.render(&format!(
                        "# Pathway drafts\n\n{}",
                        Drafts::from(drafts)
                    )),
                    Err(error) => self.report_schema_error(error),
                }
            }
        }
    }

    pub async fn list_trips(&self) -> Result<()> {
        let trips = Trips(self.planner.list_trips().await?);
        debug!("Listing {} trip(s)", trips.len());
        self.renderer.render(&format!("# Trips\n\n{trips}"))
    }

    /// Lists every violation before failing, so the response can be fixed.
    fn report_schema_error(&self, error: PlannerError) -> Result<()> {
        let PlannerError::SchemaMismatch { violations } = &error else {
            return Err(error.into());
        };

        let mut report = format!("# {SCHEMA_MISMATCH_MESSAGE}\n\n");
        for violation in violations {
            writeln!(report, "- `{}`: {}", violation.path, violation.message)?;
        }
        self.renderer.render(&report)?;
        Err(error.into())
    }
}
