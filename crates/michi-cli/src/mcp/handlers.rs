//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use michi_core::{
    ai::Role,
    display::{CreateResult, DeleteResult, Drafts, Prompt as PromptText, ScheduleBlocks, Trips, UpdateResult},
    params as core, Planner,
};
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::{
    errors::to_mcp_error,
    prompts::{split_dates, PromptKind, PROMPT_TEMPLATES},
};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types already derive `Deserialize` and, behind the `schema`
// feature, `JsonSchema`. The transparent wrapper lets the MCP layer name them
// in tool signatures without adding rmcp-specific code to the core crate.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type TripId = McpParams<core::TripId>;
pub type CreateTrip = McpParams<core::CreateTrip>;
pub type UpdateTrip = McpParams<core::UpdateTrip>;
pub type DeleteTrip = McpParams<core::DeleteTrip>;
pub type AddBlock = McpParams<core::AddBlock>;
pub type ApplyAiPlan = McpParams<core::ApplyAiPlan>;
pub type AttachPlace = McpParams<core::AttachPlace>;
pub type PromptRequest = McpParams<core::PromptRequest>;
pub type SelectDrafts = McpParams<core::SelectDrafts>;
pub type UpdateProfile = McpParams<core::UpdateProfile>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn markdown(text: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_trip(&self, Parameters(params): Parameters<CreateTrip>) -> McpResult {
        debug!("create_trip: {:?}", params);

        let trip = self
            .planner
            .lock()
            .await
            .create_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create trip", &e))?;

        markdown(CreateResult::new(trip).to_string())
    }

    pub async fn list_trips(&self) -> McpResult {
        debug!("list_trips");

        let trips = self
            .planner
            .lock()
            .await
            .list_trips()
            .await
            .map_err(|e| to_mcp_error("Failed to list trips", &e))?;

        markdown(format!("# Trips\n\n{}", Trips(trips)))
    }

    pub async fn show_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_trip: {:?}", params);

        let trip = self
            .planner
            .lock()
            .await
            .get_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show trip", &e))?;

        match trip {
            Some(trip) => markdown(trip.to_string()),
            None => Err(McpError::invalid_params(
                format!("Trip with ID {} not found", params.as_ref().id),
                None,
            )),
        }
    }

    pub async fn update_trip(&self, Parameters(params): Parameters<UpdateTrip>) -> McpResult {
        debug!("update_trip: {:?}", params);

        let (trip, changes) = self
            .planner
            .lock()
            .await
            .update_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update trip", &e))?;

        markdown(UpdateResult::with_changes(trip, changes).to_string())
    }

    pub async fn delete_trip(&self, Parameters(params): Parameters<DeleteTrip>) -> McpResult {
        debug!("delete_trip: {:?}", params);

        let trip = self
            .planner
            .lock()
            .await
            .delete_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete trip", &e))?;

        markdown(DeleteResult::new(trip).to_string())
    }

    pub async fn show_schedule(&self, Parameters(params): Parameters<TripId>) -> McpResult {
        debug!("show_schedule: {:?}", params);

        let blocks = self
            .planner
            .lock()
            .await
            .get_schedule(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show schedule", &e))?;

        markdown(format!("# Schedule\n\n{}", ScheduleBlocks(blocks)))
    }

    pub async fn generate_schedule(&self, Parameters(params): Parameters<TripId>) -> McpResult {
        debug!("generate_schedule: {:?}", params);

        let blocks = self
            .planner
            .lock()
            .await
            .generate_schedule(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate schedule", &e))?;

        markdown(format!("# Generated schedule\n\n{}", ScheduleBlocks(blocks)))
    }

    pub async fn add_block(&self, Parameters(params): Parameters<AddBlock>) -> McpResult {
        debug!("add_block: {:?}", params);

        let block = self
            .planner
            .lock()
            .await
            .add_block(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add block", &e))?;

        markdown(CreateResult::new(block).to_string())
    }

    pub async fn remove_block(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_block: {:?}", params);

        let block = self
            .planner
            .lock()
            .await
            .remove_block(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove block", &e))?;

        markdown(DeleteResult::new(block).to_string())
    }

    pub async fn attach_place(&self, Parameters(params): Parameters<AttachPlace>) -> McpResult {
        debug!("attach_place: {:?}", params);

        let block = self
            .planner
            .lock()
            .await
            .attach_place(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to attach place", &e))?;

        let change = format!("Place set to '{}'", params.as_ref().display_name);
        markdown(UpdateResult::with_changes(block, vec![change]).to_string())
    }

    pub async fn apply_ai_plan(&self, Parameters(params): Parameters<ApplyAiPlan>) -> McpResult {
        debug!("apply_ai_plan: trip {}", params.as_ref().trip_id);

        let blocks = self
            .planner
            .lock()
            .await
            .apply_ai_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to apply AI plan", &e))?;

        markdown(format!("# Applied AI plan\n\n{}", ScheduleBlocks(blocks)))
    }

    pub async fn plan_prompt(&self, Parameters(params): Parameters<PromptRequest>) -> McpResult {
        debug!("plan_prompt: {:?}", params);

        let messages = self
            .planner
            .lock()
            .await
            .plan_prompt(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build plan prompt", &e))?;

        markdown(PromptText(messages).to_string())
    }

    pub async fn drafts_prompt(&self, Parameters(params): Parameters<PromptRequest>) -> McpResult {
        debug!("drafts_prompt: {:?}", params);

        let messages = self
            .planner
            .lock()
            .await
            .drafts_prompt(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build drafts prompt", &e))?;

        markdown(PromptText(messages).to_string())
    }

    pub async fn select_drafts(&self, Parameters(params): Parameters<SelectDrafts>) -> McpResult {
        debug!("select_drafts: trip {}", params.as_ref().trip_id);

        let drafts = self
            .planner
            .lock()
            .await
            .select_drafts(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to select drafts", &e))?;

        markdown(format!("# Pathway drafts\n\n{}", Drafts::from(drafts)))
    }

    pub async fn show_profile(&self) -> McpResult {
        debug!("show_profile");

        let profile = self
            .planner
            .lock()
            .await
            .get_profile()
            .await
            .map_err(|e| to_mcp_error("Failed to show profile", &e))?;

        match profile {
            Some(profile) => markdown(profile.to_string()),
            None => markdown("No learner profile yet. Use update_profile to create one.".to_string()),
        }
    }

    pub async fn update_profile(&self, Parameters(params): Parameters<UpdateProfile>) -> McpResult {
        debug!("update_profile: {:?}", params);

        let (profile, changes) = self
            .planner
            .lock()
            .await
            .update_profile(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update profile", &e))?;

        markdown(UpdateResult::with_changes(profile, changes).to_string())
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = PROMPT_TEMPLATES
            .iter()
            .map(|template| {
                Prompt::new(
                    template.name,
                    Some(template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.to_string(),
                                description: Some(arg.description.to_string()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Render a prompt for a stored trip
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let template = PROMPT_TEMPLATES
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let argument = |name: &str| {
            request
                .arguments
                .as_ref()
                .and_then(|args| args.get(name))
                .and_then(|value| value.as_str())
                .map(str::to_string)
        };
        let trip_id = argument("trip_id").ok_or_else(|| {
            McpError::invalid_params("Required argument 'trip_id' is missing", None)
        })?;
        let params = core::PromptRequest {
            trip_id,
            dates: argument("dates")
                .map(|raw| split_dates(&raw))
                .unwrap_or_default(),
        };

        let planner = self.planner.lock().await;
        let messages = match template.kind {
            PromptKind::Plan => planner.plan_prompt(&params).await,
            PromptKind::Drafts => planner.drafts_prompt(&params).await,
        }
        .map_err(|e| to_mcp_error("Failed to build prompt", &e))?;

        // MCP prompts have no system role; system text goes out as a user turn.
        let messages = messages
            .into_iter()
            .map(|message| PromptMessage {
                role: match message.role {
                    Role::Model => PromptMessageRole::Assistant,
                    Role::System | Role::User => PromptMessageRole::User,
                },
                content: PromptMessageContent::text(message.text()),
            })
            .collect();

        Ok(GetPromptResult {
            description: Some(template.description.to_string()),
            messages,
        })
    }
}
