use jiff::{civil::date, Timestamp};
use serde_json::json;

use super::*;
use crate::{error::PlannerError, params};

fn create_test_trip() -> Trip {
    Trip {
        id: "trip-1".to_string(),
        title: "Kyoto spring".to_string(),
        start_date: date(2024, 3, 30),
        end_date: date(2024, 4, 2),
        base_location: "Kyoto".to_string(),
        learning_target: Some(LearningTarget::daily(Track::SixtyMinutes)),
        created_at: Timestamp::from_second(1_704_067_200).unwrap(), // 2024-01-01 00:00:00 UTC
        blocks: Vec::new(),
    }
}

fn create_params() -> params::CreateTrip {
    params::CreateTrip {
        title: "  Lisbon  ".to_string(),
        start_date: "2024-06-01".to_string(),
        end_date: "2024-06-07".to_string(),
        base_location: "Alfama".to_string(),
        track: Some("weekly".to_string()),
        weekly_hours: Some(3.5),
    }
}

#[test]
fn test_trip_days_cross_month_boundary() {
    let trip = create_test_trip();
    assert_eq!(
        trip.days(),
        vec![date(2024, 3, 30), date(2024, 3, 31), date(2024, 4, 1), date(2024, 4, 2)]
    );
    assert_eq!(trip.day_count(), 4);
    assert!(trip.covers(date(2024, 4, 1)));
    assert!(!trip.covers(date(2024, 4, 3)));
}

#[test]
fn test_trip_serializes_camel_case() {
    let value = serde_json::to_value(create_test_trip()).unwrap();
    assert_eq!(value["startDate"], json!("2024-03-30"));
    assert_eq!(value["baseLocation"], json!("Kyoto"));
    assert_eq!(value["learningTarget"], json!({"track": "60min"}));
    assert!(value.get("blocks").is_none());
}

#[test]
fn test_track_wire_names() {
    for track in [Track::FifteenMinutes, Track::SixtyMinutes, Track::FourHours, Track::Weekly] {
        assert_eq!(serde_json::to_value(track).unwrap(), json!(track.as_str()));
        assert_eq!(track.as_str().parse::<Track>(), Ok(track));
    }
    assert!("90min".parse::<Track>().is_err());
    assert_eq!(Track::default(), Track::SixtyMinutes);
}

#[test]
fn test_schedule_block_flattens_enrichment() {
    let block: ScheduleBlock = serde_json::from_value(json!({
        "id": "b1",
        "tripId": "trip-1",
        "date": "2024-04-01",
        "startTime": "2024-04-01T10:00:00",
        "duration": 60,
        "title": "Learning Block",
        "isGenerated": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "artifact": "Photo essay",
        "place": {"placeId": "p1", "displayName": "Gion", "lat": 35.0, "lng": 135.7}
    }))
    .unwrap();

    assert!(!block.is_manual());
    assert_eq!(block.enrichment.artifact.as_deref(), Some("Photo essay"));
    assert_eq!(block.enrichment.place.as_ref().unwrap().display_name, "Gion");

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["artifact"], json!("Photo essay"));
    assert!(value.get("description").is_none());
}

#[test]
fn test_new_trip_from_params() {
    let new_trip = NewTrip::try_from(create_params()).unwrap();
    assert_eq!(new_trip.title, "Lisbon");
    assert_eq!(new_trip.learning_target, Some(LearningTarget::weekly(3.5)));
}

#[test]
fn test_new_trip_rejects_bad_params() {
    let cases = [
        (params::CreateTrip { title: " ".to_string(), ..create_params() }, "title"),
        (params::CreateTrip { end_date: "2024-05-31".to_string(), ..create_params() }, "endDate"),
        (params::CreateTrip { start_date: "June 1st".to_string(), ..create_params() }, "startDate"),
        (params::CreateTrip { weekly_hours: None, ..create_params() }, "learningTarget.weeklyHours"),
        (params::CreateTrip { track: None, ..create_params() }, "learningTarget.track"),
        (params::CreateTrip { track: Some("daily".to_string()), ..create_params() }, "learningTarget.track"),
    ];
    for (params, expected) in cases {
        match NewTrip::try_from(params) {
            Err(PlannerError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_trip_apply_reports_changes() {
    let mut trip = create_test_trip();
    let request = UpdateTripRequest::try_from(params::UpdateTrip {
        id: trip.id.clone(),
        title: Some("Kyoto and Nara".to_string()),
        end_date: Some("2024-04-04".to_string()),
        track: Some("15min".to_string()),
        ..Default::default()
    })
    .unwrap();

    let changes = trip.apply(request).unwrap();
    assert_eq!(changes.len(), 3);
    assert_eq!(trip.title, "Kyoto and Nara");
    assert_eq!(trip.day_count(), 6);
    assert_eq!(trip.learning_target, Some(LearningTarget::daily(Track::FifteenMinutes)));
}

#[test]
fn test_trip_apply_is_all_or_nothing() {
    let mut trip = create_test_trip();
    let original = trip.clone();
    let request = UpdateTripRequest {
        title: Some("Renamed".to_string()),
        start_date: Some(date(2024, 5, 1)),
        ..Default::default()
    };

    assert!(trip.apply(request).is_err());
    assert_eq!(trip, original);
}

#[test]
fn test_weekly_hours_change_needs_weekly_track() {
    let mut trip = create_test_trip();
    let request = UpdateTripRequest {
        learning_target: TargetChange::WeeklyHours(5.0),
        ..Default::default()
    };
    assert!(trip.apply(request).is_err());

    let conflicting = params::UpdateTrip {
        id: trip.id.clone(),
        track: Some("60min".to_string()),
        clear_learning_target: true,
        ..Default::default()
    };
    assert!(UpdateTripRequest::try_from(conflicting).is_err());
}

#[test]
fn test_profile_apply_tracks_changes() {
    let now = Timestamp::from_second(1_704_067_200).unwrap();
    let later = Timestamp::from_second(1_704_153_600).unwrap();
    let mut profile = LearnerProfile::empty(now);

    let changes = profile.apply(
        ProfilePatch {
            name: Some("Aiko".to_string()),
            goals: Some("Read kanji on signs".to_string()),
            ..Default::default()
        },
        later,
    );
    assert_eq!(changes.len(), 2);
    assert_eq!(profile.updated_at, later);

    let unchanged = profile.apply(
        ProfilePatch {
            name: Some("Aiko".to_string()),
            ..Default::default()
        },
        now,
    );
    assert!(unchanged.is_empty());
    assert_eq!(profile.updated_at, later);
    assert_eq!(profile.goals.as_deref(), Some("Read kanji on signs"));
}

#[test]
fn test_draft_type_parsing() {
    assert_eq!("Themes".parse::<DraftType>(), Ok(DraftType::Themes));
    assert_eq!(serde_json::to_value(DraftType::Hybrid).unwrap(), json!("hybrid"));
    assert!("mixed".parse::<DraftType>().is_err());
}
