//! Learning target → per-day minutes.

use crate::{
    error::Result,
    models::{LearningTarget, Track},
};

/// Days the weekly budget is spread over. Every calendar day counts, not
/// only days the traveller is away.
const DAYS_PER_WEEK: f64 = 7.0;

/// A weekly hour budget spread evenly over the week, rounded to the minute.
pub fn weekly_daily_minutes(hours: f64) -> f64 {
    (hours * 60.0 / DAYS_PER_WEEK).round()
}

/// Per-day learning duration in minutes for `target`.
///
/// Weekly budgets are spread evenly over the week and rounded to the nearest
/// minute. Fails when the weekly budget is missing, not positive, above a
/// full week, or too small to give one minute a day.
pub fn daily_minutes(target: &LearningTarget) -> Result<u32> {
    target.validate()?;
    let minutes = match target.track {
        Track::FifteenMinutes => 15,
        Track::SixtyMinutes => 60,
        Track::FourHours => 240,
        Track::Weekly => {
            // validate() bounds the budget to 1..=1440 minutes a day.
            weekly_daily_minutes(target.weekly_hours.unwrap_or_default()) as u32
        }
    };
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WEEKLY_HOURS_REQUIRED;

    #[test]
    fn test_fixed_tracks() {
        assert_eq!(daily_minutes(&LearningTarget::daily(Track::FifteenMinutes)).unwrap(), 15);
        assert_eq!(daily_minutes(&LearningTarget::daily(Track::SixtyMinutes)).unwrap(), 60);
        assert_eq!(daily_minutes(&LearningTarget::daily(Track::FourHours)).unwrap(), 240);
    }

    #[test]
    fn test_default_target_is_one_hour() {
        assert_eq!(daily_minutes(&LearningTarget::default()).unwrap(), 60);
    }

    #[test]
    fn test_weekly_budget_is_spread_over_seven_days() {
        assert_eq!(daily_minutes(&LearningTarget::weekly(7.0)).unwrap(), 60);
        assert_eq!(daily_minutes(&LearningTarget::weekly(10.0)).unwrap(), 86);
        assert_eq!(daily_minutes(&LearningTarget::weekly(1.0)).unwrap(), 9);
    }

    #[test]
    fn test_fixed_tracks_ignore_weekly_hours() {
        let target = LearningTarget {
            track: Track::FifteenMinutes,
            weekly_hours: Some(0.0),
        };
        assert_eq!(daily_minutes(&target).unwrap(), 15);
    }

    #[test]
    fn test_weekly_budget_below_one_minute_a_day_fails() {
        let err = daily_minutes(&LearningTarget::weekly(0.05)).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("weeklyHours"), "{err}");

        // 0.0584 hours is 0.5 minutes a day, which rounds up to one.
        assert_eq!(daily_minutes(&LearningTarget::weekly(0.0584)).unwrap(), 1);
    }

    #[test]
    fn test_weekly_budget_is_capped_at_a_full_week() {
        assert_eq!(daily_minutes(&LearningTarget::weekly(168.0)).unwrap(), 1440);
        for hours in [168.5, 1e12] {
            let err = daily_minutes(&LearningTarget::weekly(hours)).unwrap_err();
            assert_eq!(err.status_code(), 400, "{hours}");
        }
    }

    #[test]
    fn test_weekly_requires_positive_hours() {
        for hours in [None, Some(0.0), Some(-3.0), Some(f64::NAN)] {
            let target = LearningTarget {
                track: Track::Weekly,
                weekly_hours: hours,
            };
            let err = daily_minutes(&target).unwrap_err();
            assert!(err.to_string().contains(WEEKLY_HOURS_REQUIRED), "{hours:?}: {err}");
            assert_eq!(err.status_code(), 400);
        }
    }
}
