//! Structural validation of generative-model plan output.
//!
//! The model's JSON is untrusted. [`validate_plan`] walks the raw value and
//! records every violated constraint instead of stopping at the first one, so
//! the caller can report the full list back (and, if it wants, feed it into a
//! retry prompt).

use log::warn;
use serde_json::{Map, Value};

use crate::{
    error::{PlannerError, Result, SchemaViolation},
    models::{AiPlanResponse, NARRATIVE_FIELDS},
    schedule::parse_start_time,
};

/// Validate `value` as a plan of exactly `expected_days` days.
///
/// `expected_days` is a parameter rather than the trip length because callers
/// may ask for a plan covering only some of the trip's dates.
///
/// # Errors
///
/// Returns `PlannerError::SchemaMismatch` listing every violation found.
pub fn validate_plan(value: &Value, expected_days: usize) -> Result<AiPlanResponse> {
    let mut violations = Vec::new();
    check_plan(value, expected_days, &mut violations);

    if !violations.is_empty() {
        warn!(
            "AI plan rejected with {} violation(s); first: {}",
            violations.len(),
            violations[0]
        );
        return Err(PlannerError::SchemaMismatch { violations });
    }

    serde_json::from_value(value.clone())
        .map_err(|e| PlannerError::schema("$", format!("could not be decoded: {e}")))
}

fn check_plan(value: &Value, expected_days: usize, violations: &mut Vec<SchemaViolation>) {
    let Some(plan) = value.as_object() else {
        violations.push(SchemaViolation::new("$", "must be a JSON object"));
        return;
    };

    for field in ["summary", "verifyLocally"] {
        check_optional_string(plan, field, field, violations);
    }

    let Some(days) = plan.get("days").and_then(Value::as_array) else {
        violations.push(SchemaViolation::new("days", "must be an array"));
        return;
    };

    if days.len() != expected_days {
        violations.push(SchemaViolation::new(
            "days",
            format!("expected {expected_days} day(s), got {}", days.len()),
        ));
    }

    for (index, day) in days.iter().enumerate() {
        check_day(day, &format!("days[{index}]"), expected_days, violations);
    }
}

fn check_day(day: &Value, path: &str, expected_days: usize, violations: &mut Vec<SchemaViolation>) {
    let Some(day) = day.as_object() else {
        violations.push(SchemaViolation::new(path, "must be an object"));
        return;
    };

    match whole_number(day.get("day")) {
        Some(number) if number >= 1 && number <= expected_days as u64 => {}
        Some(number) => violations.push(SchemaViolation::new(
            format!("{path}.day"),
            format!("must be between 1 and {expected_days}, got {number}"),
        )),
        None => violations.push(SchemaViolation::new(
            format!("{path}.day"),
            "must be a positive integer",
        )),
    }

    for field in NARRATIVE_FIELDS {
        if non_empty_str(day.get(field)).is_none() {
            violations.push(SchemaViolation::new(
                format!("{path}.{field}"),
                "must be a non-empty string",
            ));
        }
    }

    let Some(blocks) = day.get("scheduleBlocks").and_then(Value::as_array) else {
        violations.push(SchemaViolation::new(
            format!("{path}.scheduleBlocks"),
            "must be an array",
        ));
        return;
    };

    for (index, block) in blocks.iter().enumerate() {
        check_block(block, &format!("{path}.scheduleBlocks[{index}]"), violations);
    }
}

fn check_block(block: &Value, path: &str, violations: &mut Vec<SchemaViolation>) {
    let Some(block) = block.as_object() else {
        violations.push(SchemaViolation::new(path, "must be an object"));
        return;
    };

    match block.get("startTime").and_then(Value::as_str) {
        Some(raw) if parse_start_time(raw).is_some() => {}
        Some(raw) => violations.push(SchemaViolation::new(
            format!("{path}.startTime"),
            format!("'{raw}' is not an ISO date-time or time of day"),
        )),
        None => violations.push(SchemaViolation::new(
            format!("{path}.startTime"),
            "must be a string",
        )),
    }

    let duration_ok = whole_number(block.get("duration"))
        .is_some_and(|minutes| minutes > 0 && minutes <= u64::from(u32::MAX));
    if !duration_ok {
        violations.push(SchemaViolation::new(
            format!("{path}.duration"),
            "must be a positive integer number of minutes",
        ));
    }

    if non_empty_str(block.get("title")).is_none() {
        violations.push(SchemaViolation::new(
            format!("{path}.title"),
            "must be a non-empty string",
        ));
    }

    check_optional_string(block, "description", &format!("{path}.description"), violations);
}

fn check_optional_string(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match object.get(field) {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => violations.push(SchemaViolation::new(path, "must be a string when present")),
    }
}

/// A non-negative whole number, whether written as `60` or `60.0`.
fn whole_number(value: Option<&Value>) -> Option<u64> {
    let number = value?.as_number()?;
    if let Some(whole) = number.as_u64() {
        return Some(whole);
    }
    number
        .as_f64()
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
        .map(|n| n as u64)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn day(number: usize) -> Value {
        json!({
            "day": number,
            "drivingQuestion": "Why are the temples built on hills?",
            "fieldExperience": "Visit Kiyomizu-dera",
            "inquiryTask": "Measure the slope with a phone app",
            "artifact": "Labelled photo essay",
            "reflectionPrompt": "What would you build here?",
            "critiqueStep": "Present to a parent and take one note",
            "scheduleBlocks": [
                {
                    "startTime": format!("2024-04-{:02}T09:00:00", number),
                    "duration": 60,
                    "title": "Temple walk"
                },
                {
                    "startTime": format!("2024-04-{:02}T15:00:00", number),
                    "duration": 30,
                    "title": "Sketch review",
                    "description": "Compare sketches with the morning photos"
                }
            ]
        })
    }

    fn plan(days: usize) -> Value {
        json!({ "days": (1..=days).map(day).collect::<Vec<_>>() })
    }

    fn violations(result: Result<AiPlanResponse>) -> Vec<SchemaViolation> {
        match result {
            Err(PlannerError::SchemaMismatch { violations }) => violations,
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_fourteen_day_plan_passes() {
        let validated = validate_plan(&plan(14), 14).expect("plan should validate");
        assert_eq!(validated.days.len(), 14);
        assert!(validated.summary.is_none());
        assert!(validated.verify_locally.is_none());
        assert_eq!(validated.days[13].day, 14);
        assert_eq!(
            validated.days[0].schedule_blocks[1].description.as_deref(),
            Some("Compare sketches with the morning photos")
        );
    }

    #[test]
    fn test_optional_strings_are_carried() {
        let mut value = plan(1);
        value["summary"] = json!("A week of temples");
        value["verifyLocally"] = json!("Check opening hours");
        let validated = validate_plan(&value, 1).unwrap();
        assert_eq!(validated.summary.as_deref(), Some("A week of temples"));
        assert_eq!(validated.verify_locally.as_deref(), Some("Check opening hours"));
    }

    #[test]
    fn test_thirteen_days_when_fourteen_expected_fails() {
        let found = violations(validate_plan(&plan(13), 14));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "days");
        assert!(found[0].message.contains("expected 14"));
    }

    #[test]
    fn test_missing_artifact_fails() {
        let mut value = plan(14);
        value["days"][4].as_object_mut().unwrap().remove("artifact");

        let found = violations(validate_plan(&value, 14));
        assert_eq!(
            found,
            vec![SchemaViolation::new(
                "days[4].artifact",
                "must be a non-empty string"
            )]
        );
    }

    #[test]
    fn test_every_violation_is_reported() {
        let mut value = plan(2);
        value["days"][0]["drivingQuestion"] = json!("   ");
        value["days"][0]["scheduleBlocks"][0]["duration"] = json!(0);
        value["days"][1]["day"] = json!(9);
        value["days"][1]["scheduleBlocks"][1]["title"] = json!(null);
        value["days"][1]["scheduleBlocks"][1]["startTime"] = json!(1200);

        let paths: Vec<String> = violations(validate_plan(&value, 2))
            .into_iter()
            .map(|v| v.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "days[0].drivingQuestion",
                "days[0].scheduleBlocks[0].duration",
                "days[1].day",
                "days[1].scheduleBlocks[1].startTime",
                "days[1].scheduleBlocks[1].title",
            ]
        );
    }

    #[test]
    fn test_non_object_inputs() {
        assert_eq!(violations(validate_plan(&json!([1, 2]), 1))[0].path, "$");
        assert_eq!(violations(validate_plan(&json!({"days": "soon"}), 1))[0].path, "days");
        let found = violations(validate_plan(&json!({"days": ["x"]}), 1));
        assert_eq!(found[0].path, "days[0]");
    }

    #[test]
    fn test_unparseable_start_time_fails() {
        let mut value = plan(1);
        value["days"][0]["scheduleBlocks"][0]["startTime"] = json!("after breakfast");
        let found = violations(validate_plan(&value, 1));
        assert_eq!(found[0].path, "days[0].scheduleBlocks[0].startTime");
    }

    #[test]
    fn test_integral_float_numbers_are_accepted() {
        let mut value = plan(1);
        value["days"][0]["day"] = json!(1.0);
        value["days"][0]["scheduleBlocks"][0]["duration"] = json!(60.0);

        let validated = validate_plan(&value, 1).expect("whole floats should validate");
        assert_eq!(validated.days[0].day, 1);
        assert_eq!(validated.days[0].schedule_blocks[0].duration, 60);
    }

    #[test]
    fn test_fractional_duration_fails() {
        let mut value = plan(1);
        value["days"][0]["scheduleBlocks"][1]["duration"] = json!(12.5);
        let found = violations(validate_plan(&value, 1));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "days[0].scheduleBlocks[1].duration");
    }

    #[test]
    fn test_empty_schedule_blocks_are_allowed() {
        let mut value = plan(1);
        value["days"][0]["scheduleBlocks"] = json!([]);
        assert!(validate_plan(&value, 1).is_ok());
    }
}
