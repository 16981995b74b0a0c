//! Learner profile operations for the Planner.

use jiff::Timestamp;
use log::info;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{LearnerProfile, ProfilePatch},
    params::UpdateProfile,
};

impl Planner {
    /// The user's learner profile, if one was ever saved.
    pub async fn get_profile(&self) -> Result<Option<LearnerProfile>> {
        self.with_database(|db, user_id| db.get_profile(user_id))
            .await
    }

    /// Patches the learner profile field by field, creating it on first use.
    ///
    /// Returns the stored profile and a description of each changed field.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - the patch sets no field
    pub async fn update_profile(
        &self,
        params: &UpdateProfile,
    ) -> Result<(LearnerProfile, Vec<String>)> {
        let patch = ProfilePatch::from(params.clone());
        if patch.is_empty() {
            return Err(PlannerError::invalid_input("profile")
                .with_reason("Provide at least one profile field to update"));
        }

        let (profile, changes) = self
            .with_database(move |db, user_id| db.update_profile(user_id, patch, Timestamp::now()))
            .await?;

        info!("Updated profile for {} ({} change(s))", self.user_id, changes.len());
        Ok((profile, changes))
    }
}
