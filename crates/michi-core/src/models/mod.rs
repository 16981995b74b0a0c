//! Data models for trips, schedule blocks, AI plans and pathway drafts.
//!
//! This module contains the core domain models of the Michi learning-pathway
//! planner. Display implementations for these models live in
//! [`crate::display::models`] so that data structures stay free of
//! presentation logic.
//!
//! All models serialize with camelCase field names, matching the JSON shape
//! exchanged with the generative model and stored in the metadata columns.
//!
//! # Lifecycle
//!
//! - [`Trip`]: created from a form, edited, deleted explicitly. Owns its
//!   [`ScheduleBlock`]s.
//! - [`ScheduleBlock`]: generated blocks are replaced wholesale by every
//!   generation pass; manual blocks are only touched by explicit user action.
//! - [`AiPlanResponse`]: transient, exists between validation and
//!   reconciliation only.
//! - [`PathwayDraft`]: transient, shown to the user before a full plan is
//!   requested.
//!
//! # Examples
//!
//! ```rust
//! use michi_core::models::{LearningTarget, Track};
//!
//! let target = LearningTarget::weekly(7.0);
//! assert_eq!(target.daily_minutes().unwrap(), 60);
//!
//! let target = LearningTarget::daily(Track::FourHours);
//! assert_eq!(target.daily_minutes().unwrap(), 240);
//! ```

pub mod ai_plan;
pub mod block;
pub mod draft;
pub mod profile;
pub mod requests;
pub mod target;
pub mod trip;

#[cfg(test)]
mod tests;

pub use ai_plan::{AiPlanDay, AiPlanResponse, AiScheduleBlock, NARRATIVE_FIELDS};
pub use block::{BlockEnrichment, Place, ScheduleBlock};
pub use draft::{DraftDay, DraftType, PathwayDraft};
pub use profile::{LearnerProfile, ProfilePatch};
pub use requests::{NewTrip, TargetChange, UpdateTripRequest};
pub use target::{LearningTarget, Track, MAX_WEEKLY_HOURS, WEEKLY_HOURS_REQUIRED};
pub use trip::Trip;
