//! Prompt building and draft selection against stored trips.

use jiff::civil::Date;
use log::debug;

use super::{
    schedule_ops::{load_trip, resolve_dates},
    Planner,
};
use crate::{
    ai::{self, extract_json, PromptMessage},
    error::Result,
    models::{LearnerProfile, PathwayDraft, Trip},
    params::{PromptRequest, SelectDrafts},
};

impl Planner {
    /// Builds the full-plan prompt for a trip and the user's profile.
    ///
    /// # Errors
    ///
    /// * `PlannerError::TripNotFound` - no such trip for this user
    /// * `PlannerError::InvalidInput` - no learning target, or bad dates
    pub async fn plan_prompt(&self, params: &PromptRequest) -> Result<Vec<PromptMessage>> {
        let (profile, trip, dates) = self.prompt_context(params).await?;
        ai::build_plan_prompt(profile.as_ref(), &trip, &dates)
    }

    /// Builds the three-way pathway draft prompt.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Planner::plan_prompt`].
    pub async fn drafts_prompt(&self, params: &PromptRequest) -> Result<Vec<PromptMessage>> {
        let (profile, trip, dates) = self.prompt_context(params).await?;
        ai::build_drafts_prompt(profile.as_ref(), &trip, &dates)
    }

    /// Picks exactly one draft per pathway type from a raw model response.
    ///
    /// # Errors
    ///
    /// * `PlannerError::SchemaMismatch` - no JSON, or not exactly three drafts
    /// * `PlannerError::TripNotFound` - no such trip for this user
    pub async fn select_drafts(&self, params: &SelectDrafts) -> Result<[PathwayDraft; 3]> {
        let value = extract_json(&params.response)?;
        let trip_id = params.trip_id.clone();
        let raw_dates = params.dates.clone();

        let dates = self
            .with_database(move |db, user_id| {
                let trip = load_trip(db, user_id, &trip_id)?;
                resolve_dates(&trip, &raw_dates)
            })
            .await?;

        ai::select_drafts(&value, &dates)
    }

    async fn prompt_context(
        &self,
        params: &PromptRequest,
    ) -> Result<(Option<LearnerProfile>, Trip, Vec<Date>)> {
        let trip_id = params.trip_id.clone();
        let raw_dates = params.dates.clone();

        self.with_database(move |db, user_id| {
            let trip = load_trip(db, user_id, &trip_id)?;
            let dates = resolve_dates(&trip, &raw_dates)?;
            let profile = db.get_profile(user_id)?;
            debug!(
                "Prompt context for trip {}: {} date(s), profile {}",
                trip.id,
                dates.len(),
                if profile.is_some() { "present" } else { "absent" }
            );
            Ok((profile, trip, dates))
        })
        .await
    }
}
