//! Prompt construction for the generative text model.
//!
//! Prompts are role/parts message lists. The JSON shape each prompt asks for
//! is exactly what [`super::validate_plan`] and [`super::select_drafts`]
//! accept, so the two sides stay in step.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{LearnerProfile, LearningTarget, Track, Trip},
};

/// Author of a prompt message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

/// One message of a role/parts conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: Role,
    pub parts: Vec<String>,
}

impl PromptMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![text.into()],
        }
    }

    /// All parts joined with blank lines.
    pub fn text(&self) -> String {
        self.parts.join("\n\n")
    }
}

const PLAN_SYSTEM: &str = r#"You are **Michi**, a project-based learning designer for travelling families.
You turn a trip into a day-by-day learning pathway built on the places the learner will actually visit.

Every day follows the same arc:
- **drivingQuestion**: an open question the day investigates
- **fieldExperience**: what the learner does on site
- **inquiryTask**: a concrete investigation with something to observe or measure
- **artifact**: what the learner produces
- **reflectionPrompt**: a question for the end of the day
- **critiqueStep**: how the artifact gets feedback

Answer with a single JSON object and nothing else."#;

const PLAN_USER: &str = r#"# Trip
Title: {title}
Based in: {location}
Dates ({count} day(s)): {dates}

# Learning budget
{track}, about {minutes} minutes per day.

# Learner
{learner}

# Output
Return exactly {count} entries in `days`, one per date above, in order, numbered 1 to {count}.
Schedule blocks should add up to roughly {minutes} minutes per day.

```json
{
  "summary": "optional one-paragraph overview",
  "verifyLocally": "optional things to check on arrival (opening hours, tickets)",
  "days": [
    {
      "day": 1,
      "drivingQuestion": "...",
      "fieldExperience": "...",
      "inquiryTask": "...",
      "artifact": "...",
      "reflectionPrompt": "...",
      "critiqueStep": "...",
      "scheduleBlocks": [
        {"startTime": "{first_date}T10:00:00", "duration": {minutes}, "title": "...", "description": "optional"}
      ]
    }
  ]
}
```"#;

const DRAFTS_SYSTEM: &str = r#"You are **Michi**, a project-based learning designer for travelling families.
Before writing a full plan you offer three short pathway drafts so the family can pick an approach.
Answer with a single JSON object and nothing else."#;

const DRAFTS_USER: &str = r#"# Trip
Title: {title}
Based in: {location}
Selected dates: {dates}

# Learning budget
{track}, about {minutes} minutes per day.

# Learner
{learner}

# Output
Return exactly three drafts, one of each type:
- `continuous`: one project that grows across the whole trip
- `themes`: a different theme each day
- `hybrid`: a light continuous thread with themed days

Each draft has one short headline per selected date ({count} in total).

```json
{
  "drafts": [
    {
      "type": "continuous",
      "title": "...",
      "summary": "...",
      "days": [{"date": "{first_date}", "headline": "..."}]
    }
  ]
}
```"#;

/// Build the full-plan prompt for `dates` of `trip`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` if the trip has no learning target or
/// `dates` is empty, and propagates duration-resolution failures.
pub fn build_plan_prompt(
    profile: Option<&LearnerProfile>,
    trip: &Trip,
    dates: &[Date],
) -> Result<Vec<PromptMessage>> {
    let user = render(PLAN_USER, profile, trip, dates)?;
    Ok(vec![
        PromptMessage::new(Role::System, PLAN_SYSTEM),
        PromptMessage::new(Role::User, user),
    ])
}

/// Build the three-way draft prompt for `dates` of `trip`.
///
/// # Errors
///
/// Same conditions as [`build_plan_prompt`].
pub fn build_drafts_prompt(
    profile: Option<&LearnerProfile>,
    trip: &Trip,
    dates: &[Date],
) -> Result<Vec<PromptMessage>> {
    let user = render(DRAFTS_USER, profile, trip, dates)?;
    Ok(vec![
        PromptMessage::new(Role::System, DRAFTS_SYSTEM),
        PromptMessage::new(Role::User, user),
    ])
}

fn render(
    template: &str,
    profile: Option<&LearnerProfile>,
    trip: &Trip,
    dates: &[Date],
) -> Result<String> {
    let target = trip.learning_target.ok_or_else(|| {
        PlannerError::invalid_input("learningTarget")
            .with_reason("Trip needs a learning target before a pathway can be planned")
    })?;
    let minutes = target.daily_minutes()?;
    let first = dates.first().ok_or_else(|| {
        PlannerError::invalid_input("dates").with_reason("At least one date must be selected")
    })?;

    let date_list = dates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(template
        .replace("{title}", &trip.title)
        .replace("{location}", &trip.base_location)
        .replace("{count}", &dates.len().to_string())
        .replace("{dates}", &date_list)
        .replace("{first_date}", &first.to_string())
        .replace("{track}", &describe_target(&target))
        .replace("{minutes}", &minutes.to_string())
        .replace("{learner}", &describe_learner(profile)))
}

fn describe_target(target: &LearningTarget) -> String {
    match target.weekly_hours {
        Some(hours) if target.track == Track::Weekly => {
            format!("{} ({hours} hours per week)", target.track.label())
        }
        _ => target.track.label().to_string(),
    }
}

fn describe_learner(profile: Option<&LearnerProfile>) -> String {
    let Some(profile) = profile else {
        return "No learner profile; aim for a curious 10-year-old.".to_string();
    };

    let mut lines = Vec::new();
    if !profile.name.trim().is_empty() {
        lines.push(format!("- Name: {}", profile.name));
    }
    if let Some(age) = profile.age {
        lines.push(format!("- Age: {age}"));
    }
    if !profile.interests.is_empty() {
        lines.push(format!("- Interests: {}", profile.interests.join(", ")));
    }
    if let Some(style) = &profile.learning_style {
        lines.push(format!("- Learning style: {style}"));
    }
    if let Some(goals) = &profile.goals {
        lines.push(format!("- Goals: {goals}"));
    }

    if lines.is_empty() {
        "No learner details given.".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn trip(target: Option<LearningTarget>) -> Trip {
        Trip {
            id: "t1".to_string(),
            title: "Kyoto spring".to_string(),
            start_date: date(2024, 4, 1),
            end_date: date(2024, 4, 3),
            base_location: "Kyoto".to_string(),
            learning_target: target,
            created_at: Timestamp::UNIX_EPOCH,
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_plan_prompt_fills_every_placeholder() {
        let trip = trip(Some(LearningTarget::weekly(14.0)));
        let messages = build_plan_prompt(None, &trip, &trip.days()).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        let user = messages[1].text();
        assert!(user.contains("Kyoto spring"));
        assert!(user.contains("2024-04-01, 2024-04-02, 2024-04-03"));
        assert!(user.contains("Return exactly 3 entries"));
        assert!(user.contains("about 120 minutes per day"));
        assert!(user.contains("14 hours per week"));
        assert!(!user.contains("{minutes}"));
        assert!(!user.contains("{first_date}"));
    }

    #[test]
    fn test_profile_is_described() {
        let mut profile = LearnerProfile::empty(Timestamp::UNIX_EPOCH);
        profile.name = "Aiko".to_string();
        profile.age = Some(9);
        profile.interests = vec!["trains".to_string(), "origami".to_string()];

        let trip = trip(Some(LearningTarget::daily(Track::FifteenMinutes)));
        let messages = build_drafts_prompt(Some(&profile), &trip, &[date(2024, 4, 2)]).unwrap();
        let user = messages[1].text();

        assert!(user.contains("- Age: 9"));
        assert!(user.contains("trains, origami"));
        assert!(user.contains("\"date\": \"2024-04-02\""));
        assert!(user.contains("(1 in total)"));
    }

    #[test]
    fn test_prompt_requires_target_and_dates() {
        let err = build_plan_prompt(None, &trip(None), &[date(2024, 4, 1)]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "learningTarget"));

        let with_target = trip(Some(LearningTarget::default()));
        let err = build_drafts_prompt(None, &with_target, &[]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "dates"));
    }
}
