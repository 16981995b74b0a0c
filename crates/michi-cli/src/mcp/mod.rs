//! MCP server implementation for Michi
//!
//! Exposes trips, schedules, AI plan reconciliation and pathway drafts over
//! the Model Context Protocol, so an assistant can plan a trip end to end:
//! render a prompt, send the model's answer back and review the schedule.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use michi_core::Planner;
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    AddBlock, ApplyAiPlan, AttachPlace, CreateTrip, DeleteTrip, Id, McpResult, PromptRequest,
    SelectDrafts, TripId, UpdateProfile, UpdateTrip,
};

/// MCP server for Michi
#[derive(Clone)]
pub struct MichiMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MichiMcpServer {
    /// Create a new Michi MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_trip",
        description = "Create a trip. Requires title, startDate and endDate (YYYY-MM-DD, end on or after start). Optional baseLocation, track ('15min', '60min', '4hrs' or 'weekly') and weeklyHours (only with the weekly track). Returns the new trip ID."
    )]
    async fn create_trip(&self, params: Parameters<CreateTrip>) -> McpResult {
        self.handlers().create_trip(params).await
    }

    #[tool(
        name = "list_trips",
        description = "List all trips for the current user, newest first, with dates, base location and learning target."
    )]
    async fn list_trips(&self) -> McpResult {
        self.handlers().list_trips().await
    }

    #[tool(
        name = "show_trip",
        description = "Show a trip with its full schedule grouped by day. Use the trip ID from list_trips."
    )]
    async fn show_trip(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_trip(params).await
    }

    #[tool(
        name = "update_trip",
        description = "Update a trip's title, dates, base location or learning target. Only provided fields change; clearLearningTarget=true removes the target. Returns the list of changes."
    )]
    async fn update_trip(&self, params: Parameters<UpdateTrip>) -> McpResult {
        self.handlers().update_trip(params).await
    }

    #[tool(
        name = "delete_trip",
        description = "Permanently delete a trip and every schedule block it owns. Requires confirmed=true. This cannot be undone."
    )]
    async fn delete_trip(&self, params: Parameters<DeleteTrip>) -> McpResult {
        self.handlers().delete_trip(params).await
    }

    #[tool(
        name = "show_schedule",
        description = "Show a trip's schedule blocks ordered by date and start time."
    )]
    async fn show_schedule(&self, params: Parameters<TripId>) -> McpResult {
        self.handlers().show_schedule(params).await
    }

    #[tool(
        name = "generate_schedule",
        description = "Generate one 10:00 learning block per trip day sized from the trip's learning target. Replaces earlier generated blocks and keeps manual ones. Fails if the trip has no learning target."
    )]
    async fn generate_schedule(&self, params: Parameters<TripId>) -> McpResult {
        self.handlers().generate_schedule(params).await
    }

    #[tool(
        name = "add_block",
        description = "Add a manual schedule block to a trip day. Requires tripId, date (YYYY-MM-DD, inside the trip), startTime (HH:MM), duration in minutes and title."
    )]
    async fn add_block(&self, params: Parameters<AddBlock>) -> McpResult {
        self.handlers().add_block(params).await
    }

    #[tool(
        name = "remove_block",
        description = "Remove a single schedule block by ID."
    )]
    async fn remove_block(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_block(params).await
    }

    #[tool(
        name = "attach_place",
        description = "Attach a resolved place (placeId, displayName, lat, lng) to a schedule block."
    )]
    async fn attach_place(&self, params: Parameters<AttachPlace>) -> McpResult {
        self.handlers().attach_place(params).await
    }

    #[tool(
        name = "apply_ai_plan",
        description = "Validate a model's JSON learning plan (the answer to the plan_trip prompt, fenced or bare) and replace the trip's generated blocks with one enriched block per plan day. Requested dates map to plan days by position. On a schema mismatch nothing is written and every violation is returned with its path."
    )]
    async fn apply_ai_plan(&self, params: Parameters<ApplyAiPlan>) -> McpResult {
        self.handlers().apply_ai_plan(params).await
    }

    #[tool(
        name = "plan_prompt",
        description = "Render the project-based learning plan prompt for a trip as markdown. Optional dates limit which days the plan covers."
    )]
    async fn plan_prompt(&self, params: Parameters<PromptRequest>) -> McpResult {
        self.handlers().plan_prompt(params).await
    }

    #[tool(
        name = "drafts_prompt",
        description = "Render the prompt asking for three pathway drafts (continuous, themes, hybrid) with one headline per day."
    )]
    async fn drafts_prompt(&self, params: Parameters<PromptRequest>) -> McpResult {
        self.handlers().drafts_prompt(params).await
    }

    #[tool(
        name = "select_drafts",
        description = "Parse a model's drafts answer and return exactly three drafts in continuous, themes, hybrid order. Any other draft count is an error. Drafts without a recognised slot take it from their position, and drafts whose days are unusable get one synthesized headline per trip day."
    )]
    async fn select_drafts(&self, params: Parameters<SelectDrafts>) -> McpResult {
        self.handlers().select_drafts(params).await
    }

    #[tool(
        name = "show_profile",
        description = "Show the learner profile (name, age, interests, learning style, goals) used to personalise prompts."
    )]
    async fn show_profile(&self) -> McpResult {
        self.handlers().show_profile().await
    }

    #[tool(
        name = "update_profile",
        description = "Create or update the learner profile. Only provided fields change."
    )]
    async fn update_profile(&self, params: Parameters<UpdateProfile>) -> McpResult {
        self.handlers().update_profile(params).await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    /// Render a prompt for a stored trip
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MichiMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "michi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Michi turns a family trip into a day-by-day learning pathway.

## Core Concepts
- **Trips**: a title, an inclusive date range, a base location and an optional learning target
- **Learning target**: a track ('15min', '60min', '4hrs') or a weekly budget of hours
- **Schedule blocks**: timed learning sessions; generated, manual or AI-enriched

## Workflow Examples

### Quick schedule
1. `create_trip` with dates and a learning target
2. `generate_schedule` for one block per day
3. `show_trip` to review

### AI learning plan
1. Render the `plan_trip` prompt (or call `plan_prompt`) and send it to a model
2. Pass the model's answer to `apply_ai_plan`
3. On a schema mismatch, fix the listed paths and try again; the schedule is untouched

### Pathway drafts
1. Render `draft_pathways` (or call `drafts_prompt`)
2. Pass the answer to `select_drafts` to get continuous, themes and hybrid drafts

## Tool Categories
- **Trips**: create_trip, list_trips, show_trip, update_trip, delete_trip
- **Schedule**: show_schedule, generate_schedule, add_block, remove_block, attach_place, apply_ai_plan
- **Prompts**: plan_prompt, drafts_prompt, select_drafts
- **Profile**: show_profile, update_profile"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MichiMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Michi MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
