//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading block deletion depends on this, and it is per connection.
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Bring databases created by earlier versions up to date.
    fn apply_migrations(&self) -> Result<()> {
        let has_position_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('schedule_blocks') WHERE name = 'position'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect schedule_blocks columns")?;

        if !has_position_column {
            self.connection
                .execute(
                    "ALTER TABLE schedule_blocks ADD COLUMN position INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add position column to schedule_blocks")?;
        }

        Ok(())
    }
}
