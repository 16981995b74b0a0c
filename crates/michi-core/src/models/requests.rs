//! Validated request types built from raw parameters.

use jiff::civil::Date;

use super::{LearningTarget, Trip};
use crate::{
    error::{PlannerError, Result},
    params,
    schedule::parse_date,
};

/// A fully validated trip that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
    pub base_location: String,
    pub learning_target: Option<LearningTarget>,
}

impl TryFrom<params::CreateTrip> for NewTrip {
    type Error = PlannerError;

    fn try_from(params: params::CreateTrip) -> Result<Self> {
        let start_date = parse_date("startDate", &params.start_date)?;
        let end_date = parse_date("endDate", &params.end_date)?;
        let learning_target = target_from_raw(params.track.as_deref(), params.weekly_hours)?;

        let new_trip = NewTrip {
            title: params.title.trim().to_string(),
            start_date,
            end_date,
            base_location: params.base_location.trim().to_string(),
            learning_target,
        };
        new_trip.validate()?;
        Ok(new_trip)
    }
}

impl NewTrip {
    fn validate(&self) -> Result<()> {
        // Reuse the stored-trip rules on a throwaway value.
        Trip {
            id: String::new(),
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            base_location: self.base_location.clone(),
            learning_target: self.learning_target,
            created_at: jiff::Timestamp::UNIX_EPOCH,
            blocks: Vec::new(),
        }
        .validate()
    }
}

fn target_from_raw(track: Option<&str>, weekly_hours: Option<f64>) -> Result<Option<LearningTarget>> {
    match track {
        Some(track) => LearningTarget::parse(track, weekly_hours).map(Some),
        None if weekly_hours.is_some() => Err(PlannerError::invalid_input("learningTarget.track")
            .with_reason("A track is required when weekly hours are given")),
        None => Ok(None),
    }
}

/// What an update does to the trip's learning target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TargetChange {
    /// Leave the target as stored
    #[default]
    Keep,
    /// Replace the target
    Set(LearningTarget),
    /// Change only the weekly hour budget of the stored target
    WeeklyHours(f64),
    /// Remove the target; schedules can no longer be generated
    Clear,
}

/// Parameters for updating a trip, parsed but not yet checked against the
/// stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub base_location: Option<String>,
    pub learning_target: TargetChange,
}

impl TryFrom<params::UpdateTrip> for UpdateTripRequest {
    type Error = PlannerError;

    fn try_from(params: params::UpdateTrip) -> Result<Self> {
        let start_date = params
            .start_date
            .as_deref()
            .map(|raw| parse_date("startDate", raw))
            .transpose()?;
        let end_date = params
            .end_date
            .as_deref()
            .map(|raw| parse_date("endDate", raw))
            .transpose()?;

        let learning_target = if params.clear_learning_target {
            if params.track.is_some() {
                return Err(PlannerError::invalid_input("clearLearningTarget")
                    .with_reason("Cannot set and clear the learning target at once"));
            }
            TargetChange::Clear
        } else if let Some(track) = params.track.as_deref() {
            let track = track.parse().map_err(|reason: String| {
                PlannerError::invalid_input("learningTarget.track").with_reason(reason)
            })?;
            TargetChange::Set(LearningTarget {
                track,
                weekly_hours: params.weekly_hours,
            })
        } else if let Some(hours) = params.weekly_hours {
            TargetChange::WeeklyHours(hours)
        } else {
            TargetChange::Keep
        };

        Ok(UpdateTripRequest {
            title: params.title.map(|t| t.trim().to_string()),
            start_date,
            end_date,
            base_location: params.base_location.map(|l| l.trim().to_string()),
            learning_target,
        })
    }
}

impl Trip {
    /// Apply an update and re-validate, returning the list of changes.
    ///
    /// The trip is left untouched when the merged result is invalid.
    pub fn apply(&mut self, request: UpdateTripRequest) -> Result<Vec<String>> {
        let mut updated = self.clone();
        let mut changes = Vec::new();

        if let Some(title) = request.title {
            if title != updated.title {
                changes.push(format!("Title set to '{title}'"));
                updated.title = title;
            }
        }
        if let Some(start) = request.start_date {
            if start != updated.start_date {
                changes.push(format!("Start date set to {start}"));
                updated.start_date = start;
            }
        }
        if let Some(end) = request.end_date {
            if end != updated.end_date {
                changes.push(format!("End date set to {end}"));
                updated.end_date = end;
            }
        }
        if let Some(location) = request.base_location {
            if location != updated.base_location {
                changes.push(format!("Base location set to '{location}'"));
                updated.base_location = location;
            }
        }
        match request.learning_target {
            TargetChange::Keep => {}
            TargetChange::Set(target) => {
                if Some(target) != updated.learning_target {
                    changes.push(format!("Learning target set to {}", target.track.as_str()));
                    updated.learning_target = Some(target);
                }
            }
            TargetChange::WeeklyHours(hours) => match updated.learning_target.as_mut() {
                Some(target) if target.track == super::Track::Weekly => {
                    changes.push(format!("Weekly hours set to {hours}"));
                    target.weekly_hours = Some(hours);
                }
                _ => {
                    return Err(PlannerError::invalid_input("learningTarget.weeklyHours")
                        .with_reason("Weekly hours only apply to the weekly track"));
                }
            },
            TargetChange::Clear => {
                if updated.learning_target.take().is_some() {
                    changes.push("Learning target cleared".to_string());
                }
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(changes)
    }
}
