//! Schedule construction: date utilities, the day-based generator and
//! AI-plan reconciliation.
//!
//! Everything in this module is pure and synchronous. Functions take the trip
//! and the current block collection by value or reference and return the new
//! collection; persisting it is the caller's job (see
//! [`crate::Planner::generate_schedule`]).
//!
//! Both merge paths share one policy: manual blocks (`is_generated == false`)
//! come first and unchanged, every previously generated block is dropped, and
//! the freshly synthesized blocks follow.

pub mod dates;
pub mod duration;
pub mod generator;
pub mod reconcile;

pub use dates::{days_between, parse_date, parse_dates, parse_start_time, StartTime};
pub use duration::{daily_minutes, weekly_daily_minutes};
pub use generator::{
    generate_blocks, generated_block_id, GENERATED_BLOCK_TITLE, GENERATED_START_HOUR,
};
pub use reconcile::{ai_block_id, reconcile_ai_plan};
