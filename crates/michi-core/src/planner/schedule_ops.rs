//! Schedule operations for the Planner.

use jiff::{civil::Date, Timestamp};
use log::{debug, info};
use uuid::Uuid;

use super::Planner;
use crate::{
    ai::{extract_json, validate_plan},
    db::Database,
    error::{PlannerError, Result},
    models::{ScheduleBlock, Trip},
    params::{AddBlock, ApplyAiPlan, AttachPlace, Id, TripId},
    schedule::{generate_blocks, parse_dates, reconcile_ai_plan},
};

/// The trip, or `TripNotFound`.
pub(crate) fn load_trip(db: &Database, user_id: &str, trip_id: &str) -> Result<Trip> {
    db.get_trip(user_id, trip_id)?
        .ok_or_else(|| PlannerError::TripNotFound {
            id: trip_id.to_string(),
        })
}

/// Parse requested dates, defaulting to every day of the trip.
///
/// # Errors
///
/// * `PlannerError::InvalidInput` - a date does not parse or lies outside the
///   trip
pub(crate) fn resolve_dates(trip: &Trip, raw: &[String]) -> Result<Vec<Date>> {
    if raw.is_empty() {
        return Ok(trip.days());
    }
    let dates = parse_dates("dates", raw)?;
    if let Some(outside) = dates.iter().find(|date| !trip.covers(**date)) {
        return Err(PlannerError::invalid_input("dates").with_reason(format!(
            "{outside} is outside the trip ({} to {})",
            trip.start_date, trip.end_date
        )));
    }
    Ok(dates)
}

impl Planner {
    /// A trip's blocks ordered by date, then start time.
    pub async fn get_schedule(&self, params: &TripId) -> Result<Vec<ScheduleBlock>> {
        let trip_id = params.trip_id.clone();
        self.with_database(move |db, user_id| {
            load_trip(db, user_id, &trip_id)?;
            db.get_blocks(&trip_id)
        })
        .await
    }

    /// Regenerates the day-based schedule and stores it atomically.
    ///
    /// Manual blocks survive untouched; every generated block is replaced by
    /// one "Learning Block" per trip day at 10:00.
    ///
    /// # Errors
    ///
    /// * `PlannerError::TripNotFound` - no such trip for this user
    /// * `PlannerError::InvalidInput` - the trip has no learning target, or
    ///   the weekly track has no positive hour budget
    pub async fn generate_schedule(&self, params: &TripId) -> Result<Vec<ScheduleBlock>> {
        let trip_id = params.trip_id.clone();
        let blocks = self
            .with_database(move |db, user_id| {
                let trip = load_trip(db, user_id, &trip_id)?;
                // An empty generation result would wipe the stored schedule.
                if trip.learning_target.is_none() {
                    return Err(PlannerError::invalid_input("learningTarget").with_reason(
                        "Set a learning target on the trip before generating a schedule",
                    ));
                }

                let existing = db.get_blocks(&trip.id)?;
                let blocks = generate_blocks(&trip, existing, Timestamp::now())?;
                db.replace_blocks(&trip.id, &blocks)?;
                db.get_blocks(&trip.id)
            })
            .await?;

        info!(
            "Generated schedule for trip {}: {} block(s)",
            params.trip_id,
            blocks.len()
        );
        Ok(blocks)
    }

    /// Adds a manual block to a trip.
    ///
    /// # Errors
    ///
    /// * `PlannerError::TripNotFound` - no such trip for this user
    /// * `PlannerError::InvalidInput` - invalid fields, or the date is
    ///   outside the trip
    pub async fn add_block(&self, params: &AddBlock) -> Result<ScheduleBlock> {
        let (date, start_time) = params.validate()?;
        let params = params.clone();

        self.with_database(move |db, user_id| {
            let trip = load_trip(db, user_id, &params.trip_id)?;
            if !trip.covers(date) {
                return Err(PlannerError::invalid_input("date").with_reason(format!(
                    "{date} is outside the trip ({} to {})",
                    trip.start_date, trip.end_date
                )));
            }

            let block = ScheduleBlock {
                id: Uuid::new_v4().to_string(),
                trip_id: trip.id,
                date,
                start_time,
                duration: params.duration,
                title: params.title.trim().to_string(),
                description: params.description,
                location: params.location,
                notes: params.notes,
                is_generated: false,
                created_at: Timestamp::now(),
                enrichment: Default::default(),
            };
            db.insert_block(&block)?;
            debug!("Added manual block {} on {date}", block.id);
            Ok(block)
        })
        .await
    }

    /// Removes any block, manual or generated, and returns it.
    ///
    /// # Errors
    ///
    /// * `PlannerError::BlockNotFound` - no such block in this user's trips
    pub async fn remove_block(&self, params: &Id) -> Result<ScheduleBlock> {
        let id = params.id.clone();
        self.with_database(move |db, user_id| {
            let block = db
                .get_block(user_id, &id)?
                .ok_or_else(|| PlannerError::BlockNotFound { id: id.clone() })?;
            db.delete_block(&id)?;
            Ok(block)
        })
        .await
    }

    /// Validates a generative-model plan and replaces the trip's generated
    /// blocks with it.
    ///
    /// The plan must have one day per requested date (every trip day when no
    /// dates are given). Each AI block carries its day's narrative fields.
    ///
    /// # Errors
    ///
    /// * `PlannerError::SchemaMismatch` - the response holds no JSON object
    ///   or does not match the plan schema; every violation is listed
    /// * `PlannerError::TripNotFound` - no such trip for this user
    /// * `PlannerError::InvalidInput` - a requested date is invalid
    pub async fn apply_ai_plan(&self, params: &ApplyAiPlan) -> Result<Vec<ScheduleBlock>> {
        let value = extract_json(&params.response)?;
        let trip_id = params.trip_id.clone();
        let raw_dates = params.dates.clone();

        let blocks = self
            .with_database(move |db, user_id| {
                let trip = load_trip(db, user_id, &trip_id)?;
                let dates = resolve_dates(&trip, &raw_dates)?;
                let plan = validate_plan(&value, dates.len())?;

                let existing = db.get_blocks(&trip.id)?;
                let blocks =
                    reconcile_ai_plan(&trip.id, &plan, &dates, existing, Timestamp::now())?;
                db.replace_blocks(&trip.id, &blocks)?;
                db.get_blocks(&trip.id)
            })
            .await?;

        info!(
            "Applied AI plan to trip {}: {} block(s)",
            params.trip_id,
            blocks.len()
        );
        Ok(blocks)
    }

    /// Stores a place reference on a block.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - empty place id or bad coordinates
    /// * `PlannerError::BlockNotFound` - no such block in this user's trips
    pub async fn attach_place(&self, params: &AttachPlace) -> Result<ScheduleBlock> {
        let place = params.place()?;
        let block_id = params.block_id.clone();

        self.with_database(move |db, user_id| {
            let mut block = db
                .get_block(user_id, &block_id)?
                .ok_or_else(|| PlannerError::BlockNotFound {
                    id: block_id.clone(),
                })?;
            block.enrichment.place = Some(place);
            db.update_block_enrichment(&block.id, &block.enrichment)?;
            Ok(block)
        })
        .await
    }
}
