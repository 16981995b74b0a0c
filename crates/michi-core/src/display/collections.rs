//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with the item's own Display implementation
//! and handles the empty case with a one-line message.

use std::{fmt, ops::Index};

use crate::{
    ai::PromptMessage,
    models::{PathwayDraft, ScheduleBlock, Trip},
};

/// Newtype wrapper for displaying a list of trips as one-line summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use michi_core::{display::Trips, models::Trip};
///
/// let trip = Trip {
///     id: "t1".to_string(),
///     title: "Lisbon".to_string(),
///     start_date: date(2024, 6, 1),
///     end_date: date(2024, 6, 7),
///     base_location: "Alfama".to_string(),
///     learning_target: None,
///     created_at: Timestamp::now(),
///     blocks: vec![],
/// };
///
/// let output = Trips(vec![trip]).to_string();
/// assert!(output.contains("Lisbon"));
/// assert_eq!(Trips(vec![]).to_string(), "No trips found.\n");
/// ```
pub struct Trips(pub Vec<Trip>);

impl Trips {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Trip> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.0.iter()
    }
}

impl Index<usize> for Trips {
    type Output = Trip;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Trips {
    type Item = Trip;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trips {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trips found.");
        }
        for trip in &self.0 {
            writeln!(f, "## {} (ID: {})", trip.title, trip.id)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Dates**: {} to {} ({} days)",
                trip.start_date,
                trip.end_date,
                trip.day_count()
            )?;
            writeln!(f, "- **Based in**: {}", trip.base_location)?;
            if let Some(target) = &trip.learning_target {
                writeln!(f, "- **Learning target**: {target}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a schedule, grouped under one heading per
/// day.
pub struct ScheduleBlocks(pub Vec<ScheduleBlock>);

impl ScheduleBlocks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleBlock> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleBlock> {
        self.0.iter()
    }
}

impl Index<usize> for ScheduleBlocks {
    type Output = ScheduleBlock;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ScheduleBlocks {
    type Item = ScheduleBlock;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScheduleBlocks {
    type Item = &'a ScheduleBlock;
    type IntoIter = std::slice::Iter<'a, ScheduleBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ScheduleBlocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No schedule blocks found.");
        }
        let mut current = None;
        for block in &self.0 {
            if current != Some(block.date) {
                writeln!(f, "### {}", block.date.strftime("%A, %B %-d"))?;
                writeln!(f)?;
                current = Some(block.date);
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// The three pathway drafts, in slot order.
pub struct Drafts(pub Vec<PathwayDraft>);

impl From<[PathwayDraft; 3]> for Drafts {
    fn from(drafts: [PathwayDraft; 3]) -> Self {
        Self(drafts.into())
    }
}

impl fmt::Display for Drafts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No drafts found.");
        }
        for draft in &self.0 {
            write!(f, "{draft}")?;
        }
        Ok(())
    }
}

/// A rendered prompt conversation.
pub struct Prompt(pub Vec<PromptMessage>);

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.0 {
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
