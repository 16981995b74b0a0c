//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share one message shape: a headline
//! naming the resource, optionally the list of changes, then the resource
//! itself.

use std::fmt;

use crate::models::{LearnerProfile, ScheduleBlock, Trip};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use michi_core::{display::CreateResult, models::Trip};
///
/// let trip = Trip {
///     id: "t1".to_string(),
///     title: "Lisbon".to_string(),
///     start_date: date(2024, 6, 1),
///     end_date: date(2024, 6, 3),
///     base_location: "Alfama".to_string(),
///     learning_target: None,
///     created_at: Timestamp::now(),
///     blocks: vec![],
/// };
///
/// let output = CreateResult::new(trip).to_string();
/// assert!(output.starts_with("Created trip with ID: t1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created trip with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ScheduleBlock> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added block on {} with ID: {}",
            self.resource.date, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes that were applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Nothing changed.")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated trip with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<ScheduleBlock> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated block with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<LearnerProfile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated learner profile")?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted trip '{}' (ID: {}) and {} schedule block(s)",
            self.resource.title,
            self.resource.id,
            self.resource.blocks.len()
        )
    }
}

impl fmt::Display for DeleteResult<ScheduleBlock> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed block '{}' on {} (ID: {})",
            self.resource.title, self.resource.date, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn test_update_result_lists_changes() {
        let profile = LearnerProfile::empty(Timestamp::from_second(1_640_995_200).unwrap());

        let output = UpdateResult::with_changes(profile.clone(), vec!["Age set to 12".to_string()])
            .to_string();
        assert!(output.contains("Changes made:\n- Age set to 12\n"));

        let output = UpdateResult::new(profile).to_string();
        assert!(output.contains("Nothing changed."));
        assert!(output.contains("# Learner profile"));
    }
}
