//! Display formatting and result wrapper types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so the same data
//! can be shown differently in a list, after a create, or after an update.
//! All output is markdown, rendered by the CLI's terminal renderer or
//! returned verbatim from MCP tools.
//!
//! - [`collections`]: `Trips`, `ScheduleBlocks`, `Drafts`, `Prompt`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: `LocalDateTime`
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use michi_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::{LearningTarget, Track, Trip},
//! };
//!
//! let trip = Trip {
//!     id: "t1".to_string(),
//!     title: "Kyoto".to_string(),
//!     start_date: date(2024, 1, 1),
//!     end_date: date(2024, 1, 3),
//!     base_location: "Gion".to_string(),
//!     learning_target: Some(LearningTarget::daily(Track::FifteenMinutes)),
//!     created_at: Timestamp::now(),
//!     blocks: vec![],
//! };
//!
//! let changes = vec!["Learning target set to 15min".to_string()];
//! let output = UpdateResult::with_changes(trip, changes).to_string();
//! assert!(output.contains("Changes made:"));
//! assert!(output.contains("15 minutes a day"));
//!
//! let status = OperationStatus::failure("Deletion not confirmed".to_string());
//! assert_eq!(status.to_string(), "Error: Deletion not confirmed\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Drafts, Prompt, ScheduleBlocks, Trips};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
