//! Schedule block model definition and enrichment fields.

use jiff::{
    civil::{Date, DateTime},
    Timestamp,
};
use serde::{Deserialize, Serialize};

/// A place reference returned by a places-lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Provider identifier of the place
    pub place_id: String,
    /// Name suitable for display
    pub display_name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Optional fields layered onto a block after creation: place and image
/// references and the project-based-learning narrative of the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockEnrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique_step: Option<String>,
}

impl BlockEnrichment {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single dated, timed unit of planned learning activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    /// Unique identifier for the block
    pub id: String,

    /// ID of the owning trip
    pub trip_id: String,

    /// Calendar day the block belongs to
    pub date: Date,

    /// Local start time
    pub start_time: DateTime,

    /// Length in minutes (always positive)
    pub duration: u32,

    /// Short title
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Auto-synthesized (replaceable) vs. user-authored (preserved)
    pub is_generated: bool,

    /// Timestamp when the block was created (UTC)
    pub created_at: Timestamp,

    #[serde(flatten)]
    pub enrichment: BlockEnrichment,
}

impl ScheduleBlock {
    /// Whether the block was written by a person and must survive generation.
    pub fn is_manual(&self) -> bool {
        !self.is_generated
    }
}
