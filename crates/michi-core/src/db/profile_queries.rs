//! Learner profile queries.
//!
//! A profile is one JSON document per user. Updates read, patch and write it
//! back inside a single transaction so concurrent patches to different
//! fields cannot drop each other's changes.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{LearnerProfile, ProfilePatch},
};

const SELECT_PROFILE_SQL: &str = "SELECT data FROM profiles WHERE user_id = ?1";
const UPSERT_PROFILE_SQL: &str = "INSERT INTO profiles (user_id, data, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(user_id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at";

impl super::Database {
    /// The stored profile of `user_id`, if any.
    pub fn get_profile(&self, user_id: &str) -> Result<Option<LearnerProfile>> {
        let data: Option<String> = self
            .connection
            .query_row(SELECT_PROFILE_SQL, params![user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query profile")?;

        Ok(data.map(|text| serde_json::from_str(&text)).transpose()?)
    }

    /// Applies `patch` to the stored profile (or a blank one) and writes it
    /// back. Returns the new profile and the list of changed fields.
    pub fn update_profile(
        &mut self,
        user_id: &str,
        patch: ProfilePatch,
        now: Timestamp,
    ) -> Result<(LearnerProfile, Vec<String>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let stored: Option<String> = tx
            .query_row(SELECT_PROFILE_SQL, params![user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query profile")?;
        let mut profile = match stored {
            Some(text) => serde_json::from_str(&text)?,
            None => LearnerProfile::empty(now),
        };

        let changes = profile.apply(patch, now);
        if !changes.is_empty() {
            tx.execute(
                UPSERT_PROFILE_SQL,
                params![user_id, serde_json::to_string(&profile)?, now.to_string()],
            )
            .db_context("Failed to store profile")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((profile, changes))
    }
}
