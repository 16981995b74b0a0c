//! Display implementations for domain models.
//!
//! These implementations live apart from the model definitions so the models
//! stay presentation-free. Every implementation produces markdown suitable for
//! the terminal renderer and for MCP tool responses.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    ai::{PromptMessage, Role},
    models::{DraftType, LearnerProfile, LearningTarget, PathwayDraft, ScheduleBlock, Track, Trip},
};

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for DraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LearningTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.track, self.weekly_hours) {
            (Track::Weekly, Some(hours)) => write!(f, "{hours} hours per week"),
            (track, _) => write!(f, "{}", track.label()),
        }
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(
            f,
            "- Dates: {} to {} ({} days)",
            self.start_date,
            self.end_date,
            self.day_count()
        )?;
        writeln!(f, "- Based in: {}", self.base_location)?;
        match &self.learning_target {
            Some(target) => writeln!(f, "- Learning target: {target}")?,
            None => writeln!(f, "- Learning target: not set")?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if self.blocks.is_empty() {
            writeln!(f, "\nNo schedule blocks yet.")?;
        } else {
            writeln!(f, "\n## Schedule")?;
            writeln!(f)?;
            let mut current = None;
            for block in &self.blocks {
                if current != Some(block.date) {
                    writeln!(f, "### {}", block.date.strftime("%A, %B %-d"))?;
                    writeln!(f)?;
                    current = Some(block.date);
                }
                write!(f, "{block}")?;
            }
        }

        Ok(())
    }
}

impl ScheduleBlock {
    fn fmt_narrative(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enrichment = &self.enrichment;
        let sections = [
            ("Driving question", &enrichment.driving_question),
            ("Field experience", &enrichment.field_experience),
            ("Inquiry task", &enrichment.inquiry_task),
            ("Artifact", &enrichment.artifact),
            ("Reflection", &enrichment.reflection_prompt),
            ("Critique", &enrichment.critique_step),
        ];
        for (label, value) in sections {
            if let Some(value) = value {
                writeln!(f, "- **{label}**: {value}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = if self.is_generated { "generated" } else { "manual" };
        writeln!(
            f,
            "#### {} {} ({} min, {origin})",
            self.start_time.strftime("%H:%M"),
            self.title,
            self.duration
        )?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;

        if let Some(location) = &self.location {
            writeln!(f, "- Location: {location}")?;
        }
        if let Some(place) = &self.enrichment.place {
            writeln!(
                f,
                "- Place: {} ({:.5}, {:.5})",
                place.display_name, place.lat, place.lng
            )?;
        }
        self.fmt_narrative(f)?;

        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "> {notes}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for LearnerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            writeln!(f, "# Learner profile")?;
        } else {
            writeln!(f, "# {}", self.name)?;
        }
        writeln!(f)?;

        if let Some(age) = self.age {
            writeln!(f, "- Age: {age}")?;
        }
        if !self.interests.is_empty() {
            writeln!(f, "- Interests: {}", self.interests.join(", "))?;
        }
        if let Some(style) = &self.learning_style {
            writeln!(f, "- Learning style: {style}")?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(goals) = &self.goals {
            writeln!(f)?;
            writeln!(f, "{goals}")?;
        }

        Ok(())
    }
}

impl fmt::Display for PathwayDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.title, self.draft_type)?;
        writeln!(f)?;

        if let Some(summary) = &self.summary {
            writeln!(f, "{summary}")?;
            writeln!(f)?;
        }
        for day in &self.days {
            writeln!(f, "- **{}**: {}", day.date, day.headline)?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for PromptMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = match self.role {
            Role::System => "System",
            Role::User => "User",
            Role::Model => "Model",
        };
        writeln!(f, "## {heading}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.text())?;
        writeln!(f)
    }
}
