//! Prompt definitions for the MCP server
//!
//! Unlike static text templates, these prompts are rendered from a stored
//! trip and the learner profile, so each one names the planner prompt it
//! builds.

/// Which planner prompt a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Full project-based learning plan
    Plan,
    /// Three headline-only pathway drafts
    Drafts,
}

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: PromptKind,
    pub arguments: &'static [PromptTemplateArg],
}

const TRIP_ARGUMENTS: &[PromptTemplateArg] = &[
    PromptTemplateArg {
        name: "trip_id",
        description: "ID of the trip to plan (use list_trips to find it)",
        required: true,
    },
    PromptTemplateArg {
        name: "dates",
        description: "Comma-separated YYYY-MM-DD dates to cover; defaults to every trip day",
        required: false,
    },
];

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "plan_trip",
        description: "Ask for a day-by-day project-based learning plan for a trip. Send the model's JSON answer to apply_ai_plan.",
        kind: PromptKind::Plan,
        arguments: TRIP_ARGUMENTS,
    },
    PromptTemplate {
        name: "draft_pathways",
        description: "Ask for three pathway drafts (continuous, themes, hybrid) with one headline per day. Send the model's JSON answer to select_drafts.",
        kind: PromptKind::Drafts,
        arguments: TRIP_ARGUMENTS,
    },
];

/// Split a comma-separated date argument, dropping blanks.
pub fn split_dates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(String::from)
        .collect()
}
