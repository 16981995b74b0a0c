//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::PlannerError;

/// A one-line operation outcome, such as a refusal to delete without
/// confirmation.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl From<&PlannerError> for OperationStatus {
    fn from(error: &PlannerError) -> Self {
        Self::failure(error.to_string())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Schedule generated".to_string());
        assert_eq!(success.to_string(), "Success: Schedule generated\n");

        let error = PlannerError::TripNotFound {
            id: "t9".to_string(),
        };
        let failure = OperationStatus::from(&error);
        assert!(!failure.success);
        assert!(failure.to_string().starts_with("Error: "));
        assert!(failure.to_string().contains("t9"));
    }
}
