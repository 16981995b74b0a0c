//! Learner profile and its typed patch.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Who is learning: used to personalise prompts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    pub updated_at: Timestamp,
}

/// Field-by-field update of a [`LearnerProfile`]. `None` leaves the stored
/// value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub interests: Option<Vec<String>>,
    pub learning_style: Option<String>,
    pub goals: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl LearnerProfile {
    /// A blank profile, the base a first patch is applied to.
    pub fn empty(now: Timestamp) -> Self {
        Self {
            name: String::new(),
            age: None,
            interests: Vec::new(),
            learning_style: None,
            goals: None,
            updated_at: now,
        }
    }

    /// Apply `patch`, returning a description of every field it changed.
    pub fn apply(&mut self, patch: ProfilePatch, now: Timestamp) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(name) = patch.name {
            if name != self.name {
                changes.push(format!("Name set to '{name}'"));
                self.name = name;
            }
        }
        if let Some(age) = patch.age {
            if Some(age) != self.age {
                changes.push(format!("Age set to {age}"));
                self.age = Some(age);
            }
        }
        if let Some(interests) = patch.interests {
            if interests != self.interests {
                changes.push(format!("Interests set to {}", interests.join(", ")));
                self.interests = interests;
            }
        }
        if let Some(style) = patch.learning_style {
            if Some(&style) != self.learning_style.as_ref() {
                changes.push(format!("Learning style set to '{style}'"));
                self.learning_style = Some(style);
            }
        }
        if let Some(goals) = patch.goals {
            if Some(&goals) != self.goals.as_ref() {
                changes.push("Goals updated".to_string());
                self.goals = Some(goals);
            }
        }

        if !changes.is_empty() {
            self.updated_at = now;
        }
        changes
    }
}
