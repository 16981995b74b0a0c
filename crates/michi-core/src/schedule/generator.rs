//! One generated learning block per trip day.

use std::collections::HashMap;

use jiff::{civil::Date, Timestamp};
use log::debug;

use super::{daily_minutes, days_between};
use crate::{
    error::Result,
    models::{BlockEnrichment, ScheduleBlock, Trip},
};

/// Title given to every generated block.
pub const GENERATED_BLOCK_TITLE: &str = "Learning Block";

/// Local hour at which generated blocks start.
pub const GENERATED_START_HOUR: i8 = 10;

/// Stable identifier of the generated block for `date` of `trip_id`.
///
/// Regeneration yields the same identifier for the same day, which is what
/// makes replacing generated blocks idempotent.
pub fn generated_block_id(trip_id: &str, date: Date) -> String {
    format!("gen-{trip_id}-{date}")
}

/// Produce the new authoritative block collection for `trip`.
///
/// Manual blocks from `existing` are returned first and unchanged, followed
/// by one freshly generated block per trip day. Previously generated blocks
/// are discarded, except that a regenerated block keeps the `created_at` of
/// the block it replaces.
///
/// Returns an empty collection when the trip has no learning target; callers
/// that persist the result must check for a target first.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` when the weekly track has no positive
/// hour budget. Nothing is returned in that case, not even the manual blocks.
pub fn generate_blocks(
    trip: &Trip,
    existing: Vec<ScheduleBlock>,
    now: Timestamp,
) -> Result<Vec<ScheduleBlock>> {
    let Some(target) = trip.learning_target.as_ref() else {
        return Ok(Vec::new());
    };
    let duration = daily_minutes(target)?;

    let (manual, previous): (Vec<_>, Vec<_>) =
        existing.into_iter().partition(ScheduleBlock::is_manual);
    let previous_created: HashMap<String, Timestamp> = previous
        .into_iter()
        .map(|block| (block.id, block.created_at))
        .collect();

    let generated: Vec<ScheduleBlock> = days_between(trip.start_date, trip.end_date)
        .into_iter()
        .map(|date| {
            let id = generated_block_id(&trip.id, date);
            let created_at = previous_created.get(&id).copied().unwrap_or(now);
            ScheduleBlock {
                id,
                trip_id: trip.id.clone(),
                date,
                start_time: date.at(GENERATED_START_HOUR, 0, 0, 0),
                duration,
                title: GENERATED_BLOCK_TITLE.to_string(),
                description: None,
                location: None,
                notes: None,
                is_generated: true,
                created_at,
                enrichment: BlockEnrichment::default(),
            }
        })
        .collect();

    debug!(
        "Generated {} block(s) of {duration} min for trip {}, keeping {} manual block(s)",
        generated.len(),
        trip.id,
        manual.len()
    );

    let mut blocks = manual;
    blocks.extend(generated);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{LearningTarget, Track, WEEKLY_HOURS_REQUIRED};

    fn trip(target: Option<LearningTarget>) -> Trip {
        Trip {
            id: "trip-1".to_string(),
            title: "Kyoto".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 3),
            base_location: "Kyoto, Japan".to_string(),
            learning_target: target,
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            blocks: Vec::new(),
        }
    }

    fn manual_block(id: &str) -> ScheduleBlock {
        ScheduleBlock {
            id: id.to_string(),
            trip_id: "trip-1".to_string(),
            date: date(2024, 1, 2),
            start_time: date(2024, 1, 2).at(15, 0, 0, 0),
            duration: 45,
            title: "Tea ceremony".to_string(),
            description: Some("Booked at the ryokan".to_string()),
            location: Some("Gion".to_string()),
            notes: None,
            is_generated: false,
            created_at: Timestamp::from_second(1_700_000_100).unwrap(),
            enrichment: BlockEnrichment::default(),
        }
    }

    fn now() -> Timestamp {
        Timestamp::from_second(1_704_000_000).unwrap()
    }

    #[test]
    fn test_three_day_trip_yields_three_blocks_at_ten() {
        let trip = trip(Some(LearningTarget::daily(Track::SixtyMinutes)));
        let blocks = generate_blocks(&trip, Vec::new(), now()).unwrap();

        assert_eq!(blocks.len(), 3);
        let dates: Vec<Date> = blocks.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        for block in &blocks {
            assert!(block.is_generated);
            assert_eq!(block.start_time.hour(), 10);
            assert_eq!(block.start_time.date(), block.date);
            assert_eq!(block.title, GENERATED_BLOCK_TITLE);
            assert_eq!(block.duration, 60);
            assert_eq!(block.id, generated_block_id("trip-1", block.date));
        }
    }

    #[test]
    fn test_durations_follow_track() {
        for (target, expected) in [
            (LearningTarget::daily(Track::FifteenMinutes), 15),
            (LearningTarget::daily(Track::SixtyMinutes), 60),
            (LearningTarget::daily(Track::FourHours), 240),
            (LearningTarget::weekly(7.0), 60),
        ] {
            let blocks = generate_blocks(&trip(Some(target)), Vec::new(), now()).unwrap();
            assert!(blocks.iter().all(|b| b.duration == expected), "{target:?}");
        }
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let trip = trip(Some(LearningTarget::daily(Track::FourHours)));
        let first = generate_blocks(&trip, vec![manual_block("m1")], now()).unwrap();
        let later = Timestamp::from_second(1_705_000_000).unwrap();
        let second = generate_blocks(&trip, first.clone(), later).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_manual_blocks_survive_unchanged() {
        let trip = trip(Some(LearningTarget::daily(Track::FifteenMinutes)));
        let manual = vec![manual_block("m1"), manual_block("m2")];
        let mut blocks = generate_blocks(&trip, manual.clone(), now()).unwrap();
        // Run a few more passes to make sure nothing is duplicated.
        for _ in 0..3 {
            blocks = generate_blocks(&trip, blocks, now()).unwrap();
        }

        assert_eq!(&blocks[..2], &manual[..]);
        assert_eq!(blocks.iter().filter(|b| b.is_manual()).count(), 2);
        assert_eq!(blocks.iter().filter(|b| b.is_generated).count(), 3);
    }

    #[test]
    fn test_stale_generated_blocks_are_dropped() {
        let trip = trip(Some(LearningTarget::daily(Track::SixtyMinutes)));
        let mut stale = manual_block("gen-trip-1-2023-12-31");
        stale.is_generated = true;
        stale.date = date(2023, 12, 31);

        let blocks = generate_blocks(&trip, vec![stale], now()).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.date >= date(2024, 1, 1)));
    }

    #[test]
    fn test_missing_target_yields_nothing() {
        let blocks = generate_blocks(&trip(None), vec![manual_block("m1")], now()).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_weekly_without_hours_fails() {
        let target = LearningTarget {
            track: Track::Weekly,
            weekly_hours: None,
        };
        let err = generate_blocks(&trip(Some(target)), vec![manual_block("m1")], now())
            .unwrap_err();
        assert!(err.to_string().contains(WEEKLY_HOURS_REQUIRED));
    }
}
