//! Learning targets and their time-budget tracks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    schedule::weekly_daily_minutes,
};

/// Reason reported when a weekly track has no usable hour budget.
pub const WEEKLY_HOURS_REQUIRED: &str = "Weekly hours must be greater than 0";

/// Hours in a week; no weekly budget can exceed it.
pub const MAX_WEEKLY_HOURS: f64 = 168.0;

/// Type-safe enumeration of learning tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum Track {
    /// Fifteen minutes every day
    #[serde(rename = "15min")]
    FifteenMinutes,

    /// One hour every day
    #[default]
    #[serde(rename = "60min")]
    SixtyMinutes,

    /// Four hours every day
    #[serde(rename = "4hrs")]
    FourHours,

    /// A weekly hour budget spread over the days of the week
    #[serde(rename = "weekly")]
    Weekly,
}

impl FromStr for Track {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "15min" => Ok(Track::FifteenMinutes),
            "60min" => Ok(Track::SixtyMinutes),
            "4hrs" => Ok(Track::FourHours),
            "weekly" => Ok(Track::Weekly),
            _ => Err(format!("Invalid learning track: {s}")),
        }
    }
}

impl Track {
    /// Wire/database representation of the track.
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::FifteenMinutes => "15min",
            Track::SixtyMinutes => "60min",
            Track::FourHours => "4hrs",
            Track::Weekly => "weekly",
        }
    }

    /// Human-readable label used in prompts and terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Track::FifteenMinutes => "15 minutes a day",
            Track::SixtyMinutes => "1 hour a day",
            Track::FourHours => "4 hours a day",
            Track::Weekly => "weekly hour budget",
        }
    }
}

/// A user-selected time budget for learning, embedded in a trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LearningTarget {
    /// Selected track
    pub track: Track,

    /// Hours per week; required and positive for the weekly track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_hours: Option<f64>,
}

impl LearningTarget {
    /// A fixed daily track with no weekly budget.
    pub fn daily(track: Track) -> Self {
        Self {
            track,
            weekly_hours: None,
        }
    }

    /// A weekly track with the given hour budget.
    pub fn weekly(hours: f64) -> Self {
        Self {
            track: Track::Weekly,
            weekly_hours: Some(hours),
        }
    }

    /// Build a target from raw track/hours input, validating the result.
    pub fn parse(track: &str, weekly_hours: Option<f64>) -> Result<Self> {
        let track = track
            .parse::<Track>()
            .map_err(|reason| PlannerError::invalid_input("learningTarget.track").with_reason(reason))?;
        let target = Self {
            track,
            weekly_hours,
        };
        target.validate()?;
        Ok(target)
    }

    /// Checks the weekly-hours rule. Daily tracks ignore `weekly_hours`.
    ///
    /// A weekly budget must be positive, at most [`MAX_WEEKLY_HOURS`], and
    /// large enough to give at least one minute per day.
    pub fn validate(&self) -> Result<()> {
        if self.track != Track::Weekly {
            return Ok(());
        }
        let invalid = || PlannerError::invalid_input("learningTarget.weeklyHours");
        match self.weekly_hours {
            Some(hours) if hours.is_finite() && hours > 0.0 => {
                if hours > MAX_WEEKLY_HOURS {
                    Err(invalid().with_reason(format!(
                        "Weekly hours must be at most {MAX_WEEKLY_HOURS}, got {hours}"
                    )))
                } else if weekly_daily_minutes(hours) < 1.0 {
                    Err(invalid().with_reason(format!(
                        "Weekly hours {hours} give less than one minute per day"
                    )))
                } else {
                    Ok(())
                }
            }
            _ => Err(invalid().with_reason(WEEKLY_HOURS_REQUIRED)),
        }
    }

    /// Per-day duration in minutes for this target.
    pub fn daily_minutes(&self) -> Result<u32> {
        crate::schedule::daily_minutes(self)
    }
}
