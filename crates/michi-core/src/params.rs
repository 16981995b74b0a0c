//! Parameter structures for Michi operations
//!
//! These are the raw, interface-neutral inputs accepted by
//! [`crate::Planner`]. The CLI wraps them in clap `Args` structs and the MCP
//! server deserialises them straight from tool arguments, so they only carry
//! serde derives (plus `JsonSchema` behind the `schema` feature).
//!
//! Dates travel as ISO strings (`2024-04-01`) and are parsed into
//! [`jiff::civil::Date`] when the parameters are turned into validated
//! requests, which keeps the schema derive free of foreign types:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │  CLI / MCP      │───▶│  params::*      │───▶│ models::requests │
//! │  wrappers       │    │  (raw strings)  │    │  (typed, valid)  │
//! └─────────────────┘    └─────────────────┘    └──────────────────┘
//! ```

use jiff::civil::{Date, DateTime, Time};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{Place, ProfilePatch},
    schedule::parse_date,
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_trip and remove_block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// Parameters for operations on a trip's schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TripId {
    /// ID of the trip
    pub trip_id: String,
}

/// Parameters for creating a new trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTrip {
    /// Title of the trip (required)
    pub title: String,
    /// First day of the trip, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day of the trip (inclusive), `YYYY-MM-DD`
    pub end_date: String,
    /// Where the traveller is based
    pub base_location: String,
    /// Learning track: '15min', '60min', '4hrs' or 'weekly'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Hours per week, required for the 'weekly' track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_hours: Option<f64>,
}

/// Parameters for updating an existing trip.
///
/// Only the given fields change. The merged trip is validated as a whole, so
/// moving the start date past the end date is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: String,
    /// Updated title
    pub title: Option<String>,
    /// Updated first day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Updated last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Updated base location
    pub base_location: Option<String>,
    /// New learning track
    pub track: Option<String>,
    /// New weekly hour budget
    pub weekly_hours: Option<f64>,
    /// Remove the learning target entirely
    #[serde(default)]
    pub clear_learning_target: bool,
}

/// Parameters for deleting a trip together with its schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteTrip {
    /// ID of the trip to delete
    pub id: String,
    /// Must be true; deleting a trip also deletes every schedule block
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a manual schedule block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddBlock {
    /// ID of the trip the block belongs to
    pub trip_id: String,
    /// Day of the block, `YYYY-MM-DD`; must fall inside the trip
    pub date: String,
    /// Local start time, `HH:MM`
    pub start_time: String,
    /// Length in minutes
    pub duration: u32,
    /// Title of the block (required)
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional location
    pub location: Option<String>,
    /// Optional notes
    pub notes: Option<String>,
}

impl AddBlock {
    /// Validate the block's own fields and return its date and start time.
    ///
    /// Whether the date lies inside the trip is checked by the planner, which
    /// has the trip at hand.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - unparseable date or time, zero
    ///   duration or empty title
    pub fn validate(&self) -> Result<(Date, DateTime)> {
        let date = parse_date("date", &self.date)?;
        let time: Time = self.start_time.trim().parse().map_err(|e| {
            PlannerError::invalid_input("startTime")
                .with_reason(format!("'{}' is not a time of day: {e}", self.start_time))
        })?;
        if self.duration == 0 {
            return Err(PlannerError::invalid_input("duration")
                .with_reason("Duration must be a positive number of minutes"));
        }
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title must not be empty"));
        }
        Ok((date, date.to_datetime(time)))
    }
}

/// Parameters for applying a generative-model plan to a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ApplyAiPlan {
    /// ID of the trip
    pub trip_id: String,
    /// Raw model response text; may wrap the JSON in prose or code fences
    pub response: String,
    /// Dates the plan was requested for (`YYYY-MM-DD`); empty means every
    /// day of the trip
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Parameters for building a plan or drafts prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PromptRequest {
    /// ID of the trip
    pub trip_id: String,
    /// Dates to plan (`YYYY-MM-DD`); empty means every day of the trip
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Parameters for choosing one draft per pathway type from a model response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SelectDrafts {
    /// ID of the trip
    pub trip_id: String,
    /// Raw model response text
    pub response: String,
    /// Dates the drafts were requested for; empty means every day of the trip
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Parameters for attaching a looked-up place to a schedule block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AttachPlace {
    /// ID of the schedule block
    pub block_id: String,
    /// Provider identifier of the place
    pub place_id: String,
    /// Name to display
    pub display_name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl AttachPlace {
    /// The place reference, checked for a usable id and coordinates.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - empty id or out-of-range coordinates
    pub fn place(&self) -> Result<Place> {
        if self.place_id.trim().is_empty() {
            return Err(PlannerError::invalid_input("placeId").with_reason("Place ID must not be empty"));
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err(PlannerError::invalid_input("lat/lng").with_reason(format!(
                "Coordinates ({}, {}) are out of range",
                self.lat, self.lng
            )));
        }
        Ok(Place {
            place_id: self.place_id.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            lat: self.lat,
            lng: self.lng,
        })
    }
}

/// Parameters for updating the learner profile. Absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateProfile {
    /// Learner's name
    pub name: Option<String>,
    /// Learner's age in years
    pub age: Option<u32>,
    /// Interests, replacing the stored list
    pub interests: Option<Vec<String>>,
    /// Preferred learning style (e.g. 'hands-on', 'visual')
    pub learning_style: Option<String>,
    /// Free-form learning goals
    pub goals: Option<String>,
}

impl From<UpdateProfile> for ProfilePatch {
    fn from(params: UpdateProfile) -> Self {
        ProfilePatch {
            name: params.name.map(|n| n.trim().to_string()),
            age: params.age,
            interests: params.interests.map(|interests| {
                interests
                    .into_iter()
                    .map(|i| i.trim().to_string())
                    .filter(|i| !i.is_empty())
                    .collect()
            }),
            learning_style: params.learning_style,
            goals: params.goals,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn add_block() -> AddBlock {
        AddBlock {
            trip_id: "t1".to_string(),
            date: "2024-04-02".to_string(),
            start_time: "14:30".to_string(),
            duration: 45,
            title: "Tea ceremony".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_block_validate_valid() {
        let (day, start) = add_block().validate().unwrap();
        assert_eq!(day, date(2024, 4, 2));
        assert_eq!(start, date(2024, 4, 2).at(14, 30, 0, 0));
    }

    #[test]
    fn test_add_block_validate_rejects_bad_fields() {
        let cases = [
            (AddBlock { start_time: "half past two".to_string(), ..add_block() }, "startTime"),
            (AddBlock { duration: 0, ..add_block() }, "duration"),
            (AddBlock { title: "  ".to_string(), ..add_block() }, "title"),
            (AddBlock { date: "2024-02-30".to_string(), ..add_block() }, "date"),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(PlannerError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_attach_place_checks_coordinates() {
        let params = AttachPlace {
            block_id: "b1".to_string(),
            place_id: "ChIJ123".to_string(),
            display_name: " Kinkaku-ji ".to_string(),
            lat: 35.03,
            lng: 135.72,
        };
        assert_eq!(params.place().unwrap().display_name, "Kinkaku-ji");

        let bad = AttachPlace { lat: 120.0, ..params };
        assert!(bad.place().is_err());
    }

    #[test]
    fn test_update_profile_into_patch() {
        let patch: ProfilePatch = UpdateProfile {
            name: Some(" Aiko ".to_string()),
            interests: Some(vec!["trains".to_string(), " ".to_string()]),
            ..Default::default()
        }
        .into();

        assert_eq!(patch.name.as_deref(), Some("Aiko"));
        assert_eq!(patch.interests, Some(vec!["trains".to_string()]));
        assert!(patch.age.is_none());
        assert!(!patch.is_empty());
        assert!(ProfilePatch::from(UpdateProfile::default()).is_empty());
    }
}
