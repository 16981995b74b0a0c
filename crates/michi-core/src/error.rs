//! Error types for the planner library.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message carried by every schema-mismatch response body.
pub const SCHEMA_MISMATCH_MESSAGE: &str = "AI response does not match schema";

/// A single field-level constraint violated by a generative-model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON path of the offending value (e.g. `days[2].artifact`)
    pub path: String,
    /// What the value should have been
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: String },
    /// Schedule block not found for the given ID
    #[error("Schedule block with ID {id} not found")]
    BlockNotFound { id: String },
    /// No learner profile stored for the user
    #[error("No learner profile found for user {user_id}")]
    ProfileNotFound { user_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Generative-model output failed structural validation
    #[error("AI response does not match schema ({} violation(s))", .violations.len())]
    SchemaMismatch { violations: Vec<SchemaViolation> },
    /// A third-party service refused or failed the request
    #[error("{service} is temporarily unavailable")]
    UpstreamUnavailable { service: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Schema mismatch with a single violation.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        PlannerError::SchemaMismatch {
            violations: vec![SchemaViolation::new(path, message)],
        }
    }

    /// HTTP status a route layer should answer with for this error.
    ///
    /// Field validation problems are the caller's to fix (400), missing records
    /// are 404, third-party refusals are 502 and everything else is a 500.
    /// Stored JSON that no longer decodes is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            PlannerError::InvalidInput { .. } => 400,
            PlannerError::TripNotFound { .. }
            | PlannerError::BlockNotFound { .. }
            | PlannerError::ProfileNotFound { .. } => 404,
            PlannerError::UpstreamUnavailable { .. } => 502,
            PlannerError::Database { .. }
            | PlannerError::FileSystem { .. }
            | PlannerError::XdgDirectory(_)
            | PlannerError::Configuration { .. }
            | PlannerError::Serialization { .. }
            | PlannerError::SchemaMismatch { .. } => 500,
        }
    }

    /// Build the JSON body a route layer should return.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody::from(self)
    }
}

/// JSON error body: always an `error` string, plus enumerated violations for
/// schema mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<SchemaViolation>>,
}

impl From<&PlannerError> for ErrorBody {
    fn from(error: &PlannerError) -> Self {
        match error {
            PlannerError::SchemaMismatch { violations } => ErrorBody {
                error: SCHEMA_MISMATCH_MESSAGE.to_string(),
                details: Some(violations.clone()),
            },
            // Database internals stay in the logs.
            PlannerError::Database { message, .. } => ErrorBody {
                error: message.clone(),
                details: None,
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
