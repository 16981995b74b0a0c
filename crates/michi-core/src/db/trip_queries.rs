//! Trip CRUD queries.

use rusqlite::{params, types::Type, OptionalExtension, Row};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{LearningTarget, Trip},
};

const TRIP_COLUMNS: &str =
    "id, title, start_date, end_date, base_location, track, weekly_hours, created_at";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (id, user_id, title, start_date, end_date, base_location, track, weekly_hours, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET title = ?1, start_date = ?2, end_date = ?3, base_location = ?4, track = ?5, weekly_hours = ?6 WHERE id = ?7 AND user_id = ?8";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1 AND user_id = ?2";

impl super::Database {
    fn build_trip_from_row(row: &Row<'_>) -> rusqlite::Result<Trip> {
        let track: Option<String> = row.get(5)?;
        let weekly_hours: Option<f64> = row.get(6)?;
        let learning_target = match track {
            Some(raw) => Some(LearningTarget {
                track: raw.parse().map_err(|e: String| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into())
                })?,
                weekly_hours,
            }),
            None => None,
        };

        Ok(Trip {
            id: row.get(0)?,
            title: row.get(1)?,
            start_date: parse_column(row, 2)?,
            end_date: parse_column(row, 3)?,
            base_location: row.get(4)?,
            learning_target,
            created_at: parse_column(row, 7)?,
            blocks: Vec::new(),
        })
    }

    /// Stores a new trip owned by `user_id`.
    pub fn insert_trip(&self, user_id: &str, trip: &Trip) -> Result<()> {
        let target = trip.learning_target.as_ref();
        self.connection
            .execute(
                INSERT_TRIP_SQL,
                params![
                    trip.id,
                    user_id,
                    trip.title,
                    trip.start_date.to_string(),
                    trip.end_date.to_string(),
                    trip.base_location,
                    target.map(|t| t.track.as_str()),
                    target.and_then(|t| t.weekly_hours),
                    trip.created_at.to_string(),
                ],
            )
            .db_context("Failed to insert trip")?;
        Ok(())
    }

    /// Retrieves one of `user_id`'s trips, without its blocks.
    pub fn get_trip(&self, user_id: &str, id: &str) -> Result<Option<Trip>> {
        self.connection
            .query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1 AND user_id = ?2"),
                params![id, user_id],
                Self::build_trip_from_row,
            )
            .optional()
            .db_context("Failed to query trip")
    }

    /// Lists `user_id`'s trips ordered by start date.
    pub fn list_trips(&self, user_id: &str) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TRIP_COLUMNS} FROM trips WHERE user_id = ?1 ORDER BY start_date, created_at"
            ))
            .db_context("Failed to prepare trip list query")?;

        let trips = stmt
            .query_map(params![user_id], Self::build_trip_from_row)
            .db_context("Failed to list trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trip row")?;
        Ok(trips)
    }

    /// Writes the editable fields of `trip` back. Returns whether a row
    /// matched.
    pub fn update_trip(&self, user_id: &str, trip: &Trip) -> Result<bool> {
        let target = trip.learning_target.as_ref();
        let updated = self
            .connection
            .execute(
                UPDATE_TRIP_SQL,
                params![
                    trip.title,
                    trip.start_date.to_string(),
                    trip.end_date.to_string(),
                    trip.base_location,
                    target.map(|t| t.track.as_str()),
                    target.and_then(|t| t.weekly_hours),
                    trip.id,
                    user_id,
                ],
            )
            .db_context("Failed to update trip")?;
        Ok(updated > 0)
    }

    /// Deletes a trip; its blocks go with it. Returns whether a row matched.
    pub fn delete_trip(&self, user_id: &str, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_TRIP_SQL, params![id, user_id])
            .db_context("Failed to delete trip")?;
        Ok(deleted > 0)
    }
}
