//! Typed shape of a validated multi-day AI plan.
//!
//! Values of these types only exist after [`crate::ai::validate_plan`] has
//! accepted the raw model output; they are mapped into
//! [`ScheduleBlock`](super::ScheduleBlock)s and then dropped.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use super::BlockEnrichment;

/// Names of the narrative fields every plan day must carry.
pub const NARRATIVE_FIELDS: [&str; 6] = [
    "drivingQuestion",
    "fieldExperience",
    "inquiryTask",
    "artifact",
    "reflectionPrompt",
    "critiqueStep",
];

/// A schedule block as described by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiScheduleBlock {
    pub start_time: String,
    #[serde(deserialize_with = "whole_u32")]
    pub duration: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One day of a project-based learning plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiPlanDay {
    /// 1-based day number
    #[serde(deserialize_with = "whole_u32")]
    pub day: u32,
    pub driving_question: String,
    pub field_experience: String,
    pub inquiry_task: String,
    pub artifact: String,
    pub reflection_prompt: String,
    pub critique_step: String,
    pub schedule_blocks: Vec<AiScheduleBlock>,
}

impl AiPlanDay {
    /// The day's narrative as block enrichment.
    pub fn narrative(&self) -> BlockEnrichment {
        BlockEnrichment {
            driving_question: Some(self.driving_question.clone()),
            field_experience: Some(self.field_experience.clone()),
            inquiry_task: Some(self.inquiry_task.clone()),
            artifact: Some(self.artifact.clone()),
            reflection_prompt: Some(self.reflection_prompt.clone()),
            critique_step: Some(self.critique_step.clone()),
            ..BlockEnrichment::default()
        }
    }
}

/// Models write whole numbers as `60` or `60.0`; both decode to 60.
fn whole_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(D::Error::custom(format!("{value} is not a whole number of minutes or days")));
    }
    Ok(value as u32)
}

/// The full plan: exactly one entry per requested day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiPlanResponse {
    pub days: Vec<AiPlanDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_locally: Option<String>,
}
