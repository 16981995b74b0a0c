//! Trip operations for the Planner.

use jiff::Timestamp;
use log::info;
use uuid::Uuid;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{NewTrip, Trip, UpdateTripRequest},
    params::{CreateTrip, DeleteTrip, Id, UpdateTrip},
};

impl Planner {
    /// Validates and stores a new trip.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - blank title or location, unparseable
    ///   dates, start after end, or an invalid learning target
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        let new_trip = NewTrip::try_from(params.clone())?;
        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            title: new_trip.title,
            start_date: new_trip.start_date,
            end_date: new_trip.end_date,
            base_location: new_trip.base_location,
            learning_target: new_trip.learning_target,
            created_at: Timestamp::now(),
            blocks: Vec::new(),
        };

        let stored = trip.clone();
        self.with_database(move |db, user_id| db.insert_trip(user_id, &stored))
            .await?;

        info!(
            "Created trip {} ({} to {}, {} day(s))",
            trip.id,
            trip.start_date,
            trip.end_date,
            trip.day_count()
        );
        Ok(trip)
    }

    /// Retrieves a trip with its schedule blocks eagerly loaded.
    pub async fn get_trip(&self, params: &Id) -> Result<Option<Trip>> {
        let id = params.id.clone();
        self.with_database(move |db, user_id| {
            let Some(mut trip) = db.get_trip(user_id, &id)? else {
                return Ok(None);
            };
            trip.blocks = db.get_blocks(&trip.id)?;
            Ok(Some(trip))
        })
        .await
    }

    /// Lists the user's trips ordered by start date, without blocks.
    pub async fn list_trips(&self) -> Result<Vec<Trip>> {
        self.with_database(|db, user_id| db.list_trips(user_id)).await
    }

    /// Applies a partial update to a trip and returns it with the list of
    /// changes.
    ///
    /// Schedule blocks are left alone; regenerate to follow new dates or a
    /// new target.
    ///
    /// # Errors
    ///
    /// * `PlannerError::TripNotFound` - no such trip for this user
    /// * `PlannerError::InvalidInput` - the merged trip is invalid
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<(Trip, Vec<String>)> {
        let id = params.id.clone();
        let request = UpdateTripRequest::try_from(params.clone())?;

        let (trip, changes) = self
            .with_database(move |db, user_id| {
                let mut trip = db
                    .get_trip(user_id, &id)?
                    .ok_or_else(|| PlannerError::TripNotFound { id: id.clone() })?;
                let changes = trip.apply(request)?;
                if !changes.is_empty() {
                    db.update_trip(user_id, &trip)?;
                }
                trip.blocks = db.get_blocks(&trip.id)?;
                Ok((trip, changes))
            })
            .await?;

        info!("Updated trip {} ({} change(s))", trip.id, changes.len());
        Ok((trip, changes))
    }

    /// Deletes a trip and its whole schedule, returning what was deleted.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - `confirmed` is not set
    /// * `PlannerError::TripNotFound` - no such trip for this user
    pub async fn delete_trip(&self, params: &DeleteTrip) -> Result<Trip> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Deleting a trip also deletes its schedule; set confirmed to proceed",
            ));
        }

        let id = params.id.clone();
        let trip = self
            .with_database(move |db, user_id| {
                let mut trip = db
                    .get_trip(user_id, &id)?
                    .ok_or_else(|| PlannerError::TripNotFound { id: id.clone() })?;
                trip.blocks = db.get_blocks(&trip.id)?;
                db.delete_trip(user_id, &id)?;
                Ok(trip)
            })
            .await?;

        info!("Deleted trip {} with {} block(s)", trip.id, trip.blocks.len());
        Ok(trip)
    }
}
