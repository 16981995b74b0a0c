//! Core library for the Michi trip learning-pathway planner.
//!
//! A trip is a date range with a base location and, optionally, a learning
//! target. This crate turns that into a day-by-day schedule of learning
//! blocks, either a deterministic default plan or a plan produced by a
//! generative model. Model output is validated against a strict schema
//! before it replaces anything stored.
//!
//! # Layers
//!
//! - [`schedule`]: pure scheduling rules (per-day duration, trip days, block
//!   generation, AI plan reconciliation)
//! - [`ai`]: prompt building, JSON extraction, schema validation and draft
//!   selection for generative-model responses
//! - [`db`]: SQLite storage for trips, blocks and learner profiles
//! - [`planner`]: the async API tying storage and rules together
//! - [`display`]: markdown formatting for terminal and MCP output
//!
//! # Quick Start
//!
//! ```rust
//! use michi_core::{params::{CreateTrip, TripId}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("michi.db"))
//!     .build()
//!     .await?;
//!
//! let trip = planner
//!     .create_trip(&CreateTrip {
//!         title: "Kyoto".to_string(),
//!         start_date: "2024-01-01".to_string(),
//!         end_date: "2024-01-03".to_string(),
//!         base_location: "Gion".to_string(),
//!         track: Some("15min".to_string()),
//!         weekly_hours: None,
//!     })
//!     .await?;
//!
//! let blocks = planner
//!     .generate_schedule(&TripId { trip_id: trip.id.clone() })
//!     .await?;
//! assert_eq!(blocks.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod cache;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod places;
pub mod planner;
pub mod schedule;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Drafts, LocalDateTime, OperationStatus, Prompt, ScheduleBlocks,
    Trips, UpdateResult,
};
pub use error::{ErrorBody, PlannerError, Result, SchemaViolation};
pub use models::{
    DraftType, LearnerProfile, LearningTarget, PathwayDraft, ScheduleBlock, Track, Trip,
};
pub use params::{
    AddBlock, ApplyAiPlan, AttachPlace, CreateTrip, DeleteTrip, Id, PromptRequest, SelectDrafts,
    TripId, UpdateProfile, UpdateTrip,
};
pub use planner::{Planner, PlannerBuilder};
