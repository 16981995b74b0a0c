//! Map a validated AI plan onto schedule blocks.

use jiff::{civil::Date, Timestamp};
use log::debug;
use uuid::Uuid;

use super::dates::{parse_start_time, StartTime};
use crate::{
    error::{PlannerError, Result},
    models::{AiPlanResponse, ScheduleBlock},
};

/// Identifier for an AI-derived block.
///
/// AI plans are not assumed idempotent, so these identifiers are unique per
/// call rather than stable across regenerations.
pub fn ai_block_id(trip_id: &str, day: u32) -> String {
    format!("ai-{trip_id}-d{day}-{}", Uuid::new_v4().simple())
}

/// Turn every block descriptor of `plan` into a generated [`ScheduleBlock`]
/// and merge with the manual blocks of `existing`.
///
/// `dates` are the calendar days the plan was requested for, in order; they
/// date descriptors whose start time carries no date (`day` N maps to
/// `dates[N - 1]`). Descriptors with a full date-time keep their own date.
///
/// Previously generated blocks are discarded wholesale; manual blocks are
/// returned first, verbatim.
pub fn reconcile_ai_plan(
    trip_id: &str,
    plan: &AiPlanResponse,
    dates: &[Date],
    existing: Vec<ScheduleBlock>,
    now: Timestamp,
) -> Result<Vec<ScheduleBlock>> {
    let mut generated = Vec::new();

    for day in &plan.days {
        let narrative = day.narrative();
        for (index, descriptor) in day.schedule_blocks.iter().enumerate() {
            let path = format!("days[{}].scheduleBlocks[{index}].startTime", day.day);
            let start_time = match parse_start_time(&descriptor.start_time) {
                Some(StartTime::At(datetime)) => datetime,
                Some(StartTime::TimeOfDay(time)) => {
                    let date = dates
                        .get((day.day as usize).wrapping_sub(1))
                        .copied()
                        .ok_or_else(|| {
                            PlannerError::schema(&path, "time of day given but the plan day has no date")
                        })?;
                    date.to_datetime(time)
                }
                None => {
                    return Err(PlannerError::schema(path, "must be an ISO date-time"));
                }
            };

            generated.push(ScheduleBlock {
                id: ai_block_id(trip_id, day.day),
                trip_id: trip_id.to_string(),
                date: start_time.date(),
                start_time,
                duration: descriptor.duration,
                title: descriptor.title.clone(),
                description: descriptor.description.clone(),
                location: None,
                notes: None,
                is_generated: true,
                created_at: now,
                enrichment: narrative.clone(),
            });
        }
    }

    let mut blocks: Vec<ScheduleBlock> = existing.into_iter().filter(ScheduleBlock::is_manual).collect();
    debug!(
        "Reconciled {} AI block(s) for trip {trip_id}, keeping {} manual block(s)",
        generated.len(),
        blocks.len()
    );
    blocks.extend(generated);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{AiPlanDay, AiScheduleBlock, BlockEnrichment};

    fn plan_day(day: u32, blocks: Vec<AiScheduleBlock>) -> AiPlanDay {
        AiPlanDay {
            day,
            driving_question: "How did water shape the city?".to_string(),
            field_experience: "Walk the canal path".to_string(),
            inquiry_task: "Map three bridges".to_string(),
            artifact: "Annotated sketch map".to_string(),
            reflection_prompt: "What surprised you?".to_string(),
            critique_step: "Swap maps with a sibling".to_string(),
            schedule_blocks: blocks,
        }
    }

    fn descriptor(start: &str, duration: u32, title: &str) -> AiScheduleBlock {
        AiScheduleBlock {
            start_time: start.to_string(),
            duration,
            title: title.to_string(),
            description: None,
        }
    }

    fn block(id: &str, generated: bool) -> ScheduleBlock {
        ScheduleBlock {
            id: id.to_string(),
            trip_id: "t1".to_string(),
            date: date(2024, 1, 1),
            start_time: date(2024, 1, 1).at(8, 0, 0, 0),
            duration: 30,
            title: "Breakfast market".to_string(),
            description: None,
            location: None,
            notes: Some("bring cash".to_string()),
            is_generated: generated,
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            enrichment: BlockEnrichment::default(),
        }
    }

    fn now() -> Timestamp {
        Timestamp::from_second(1_704_000_000).unwrap()
    }

    #[test]
    fn test_manual_block_plus_two_ai_blocks() {
        let plan = AiPlanResponse {
            days: vec![plan_day(
                1,
                vec![
                    descriptor("2024-01-01T09:00:00", 90, "Canal walk"),
                    descriptor("2024-01-01T14:00:00", 45, "Bridge mapping"),
                ],
            )],
            summary: None,
            verify_locally: None,
        };
        let manual = block("manual-1", false);

        let blocks = reconcile_ai_plan(
            "t1",
            &plan,
            &[date(2024, 1, 1)],
            vec![manual.clone(), block("gen-old", true)],
            now(),
        )
        .unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], manual);
        assert!(blocks[1..].iter().all(|b| b.is_generated));
        assert_eq!(blocks[1].title, "Canal walk");
        assert_eq!(blocks[1].duration, 90);
        assert_eq!(blocks[2].title, "Bridge mapping");
        assert_eq!(blocks[2].duration, 45);
        assert_eq!(blocks[2].start_time, date(2024, 1, 1).at(14, 0, 0, 0));
        assert_eq!(blocks[1].enrichment.artifact.as_deref(), Some("Annotated sketch map"));
    }

    #[test]
    fn test_ai_block_ids_are_unique_and_namespaced() {
        let plan = AiPlanResponse {
            days: vec![plan_day(
                2,
                vec![
                    descriptor("2024-01-02T09:00:00", 30, "A"),
                    descriptor("2024-01-02T09:00:00", 30, "B"),
                ],
            )],
            summary: None,
            verify_locally: None,
        };
        let blocks = reconcile_ai_plan("t1", &plan, &[], Vec::new(), now()).unwrap();

        assert_ne!(blocks[0].id, blocks[1].id);
        assert!(blocks.iter().all(|b| b.id.starts_with("ai-t1-d2-")));
    }

    #[test]
    fn test_time_of_day_uses_requested_dates() {
        let plan = AiPlanResponse {
            days: vec![
                plan_day(1, vec![descriptor("09:15", 30, "Morning")]),
                plan_day(2, vec![descriptor("16:00", 30, "Afternoon")]),
            ],
            summary: None,
            verify_locally: None,
        };
        let dates = [date(2024, 5, 3), date(2024, 5, 7)];
        let blocks = reconcile_ai_plan("t1", &plan, &dates, Vec::new(), now()).unwrap();

        assert_eq!(blocks[0].date, date(2024, 5, 3));
        assert_eq!(blocks[0].start_time, date(2024, 5, 3).at(9, 15, 0, 0));
        assert_eq!(blocks[1].date, date(2024, 5, 7));
    }

    #[test]
    fn test_time_of_day_without_date_is_schema_error() {
        let plan = AiPlanResponse {
            days: vec![plan_day(3, vec![descriptor("09:15", 30, "Morning")])],
            summary: None,
            verify_locally: None,
        };
        let err = reconcile_ai_plan("t1", &plan, &[date(2024, 5, 3)], Vec::new(), now())
            .unwrap_err();
        assert!(matches!(err, PlannerError::SchemaMismatch { .. }));
    }
}
