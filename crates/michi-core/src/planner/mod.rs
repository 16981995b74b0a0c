//! High-level async API over trips, schedules, profiles and prompts.
//!
//! [`Planner`] is what the CLI and the MCP server talk to. Each operation
//! opens the SQLite database on a blocking thread, runs the pure schedule or
//! AI logic against the stored records and writes the result back.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Planner      │    │  schedule / ai  │    │    Database     │
//! │  (trip_ops,     │───▶│  (pure, sync)   │    │   (via db/)     │
//! │  schedule_ops…) │───────────────────────────▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`trip_ops`]: Trip create, list, show, edit and delete
//! - [`schedule_ops`]: Schedule generation, manual blocks and AI plans
//! - [`profile_ops`]: Learner profile read and patch
//! - [`prompt_ops`]: Prompt building and draft selection for a stored trip
//!
//! # Usage
//!
//! ```rust
//! use michi_core::{params::{CreateTrip, TripId}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/michi-example.db"))
//!     .build()
//!     .await?;
//!
//! let trip = planner
//!     .create_trip(&CreateTrip {
//!         title: "Lisbon".to_string(),
//!         start_date: "2024-06-01".to_string(),
//!         end_date: "2024-06-03".to_string(),
//!         base_location: "Alfama".to_string(),
//!         track: Some("60min".to_string()),
//!         weekly_hours: None,
//!     })
//!     .await?;
//!
//! let blocks = planner
//!     .generate_schedule(&TripId { trip_id: trip.id })
//!     .await?;
//! assert_eq!(blocks.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod profile_ops;
pub mod prompt_ops;
pub mod schedule_ops;
pub mod trip_ops;


pub use builder::PlannerBuilder;

/// User id used when none is configured.
pub const DEFAULT_USER_ID: &str = "local";

/// Main planner interface, scoped to one user.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) user_id: String,
}

impl Planner {
    /// Creates a new planner with the specified database path and user.
    pub(crate) fn new(db_path: PathBuf, user_id: String) -> Self {
        Self { db_path, user_id }
    }

    /// The user whose trips and profile this planner operates on.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Run `f` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database, &str) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let user_id = self.user_id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db, &user_id)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
