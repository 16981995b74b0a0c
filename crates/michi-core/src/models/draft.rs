//! Pathway drafts: three headline-only candidate approaches.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// The approach a pathway draft takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DraftType {
    /// One continuous project across the whole trip
    Continuous,
    /// A different theme each day
    Themes,
    /// A continuous thread with themed days
    Hybrid,
}

impl DraftType {
    /// The three slots, in the order they are returned.
    pub const ALL: [DraftType; 3] = [DraftType::Continuous, DraftType::Themes, DraftType::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftType::Continuous => "continuous",
            DraftType::Themes => "themes",
            DraftType::Hybrid => "hybrid",
        }
    }

    /// Default title when the model supplied none.
    pub fn default_title(&self) -> &'static str {
        match self {
            DraftType::Continuous => "Continuous project",
            DraftType::Themes => "Daily themes",
            DraftType::Hybrid => "Hybrid pathway",
        }
    }
}

impl FromStr for DraftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continuous" => Ok(DraftType::Continuous),
            "themes" | "theme" => Ok(DraftType::Themes),
            "hybrid" => Ok(DraftType::Hybrid),
            _ => Err(format!("Invalid draft type: {s}")),
        }
    }
}

/// One headline for one selected date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftDay {
    pub date: Date,
    pub headline: String,
}

/// A lightweight candidate pathway offered before full plan generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathwayDraft {
    #[serde(rename = "type")]
    pub draft_type: DraftType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub days: Vec<DraftDay>,
}
