//! Trip model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{LearningTarget, ScheduleBlock};
use crate::{
    error::{PlannerError, Result},
    schedule::days_between,
};

/// A user-defined travel date range with a base location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: String,

    /// Title of the trip
    pub title: String,

    /// First calendar day of the trip
    pub start_date: Date,

    /// Last calendar day of the trip (inclusive)
    pub end_date: Date,

    /// Where the traveller is based
    pub base_location: String,

    /// Daily or weekly learning budget; schedules are only generated when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_target: Option<LearningTarget>,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Schedule blocks, loaded on demand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<ScheduleBlock>,
}

impl Trip {
    /// Every calendar day covered by the trip, ascending.
    pub fn days(&self) -> Vec<Date> {
        days_between(self.start_date, self.end_date)
    }

    /// Number of calendar days covered by the trip.
    pub fn day_count(&self) -> usize {
        self.days().len()
    }

    /// Whether `date` falls inside the trip's date range.
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Checks the trip's structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title must not be empty"));
        }
        if self.base_location.trim().is_empty() {
            return Err(PlannerError::invalid_input("baseLocation")
                .with_reason("Base location must not be empty"));
        }
        if self.start_date > self.end_date {
            return Err(PlannerError::invalid_input("endDate").with_reason(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        if let Some(target) = &self.learning_target {
            target.validate()?;
        }
        Ok(())
    }
}
