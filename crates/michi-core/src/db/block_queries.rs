//! Schedule block queries.

use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::{json_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{BlockEnrichment, ScheduleBlock},
};

const BLOCK_COLUMNS: &str = "b.id, b.trip_id, b.date, b.start_time, b.duration, b.title, b.description, b.location, b.notes, b.is_generated, b.created_at, b.enrichment";
const INSERT_BLOCK_SQL: &str = "INSERT INTO schedule_blocks (id, trip_id, date, start_time, duration, title, description, location, notes, is_generated, created_at, enrichment, position) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM schedule_blocks WHERE trip_id = ?1";
const DELETE_TRIP_BLOCKS_SQL: &str = "DELETE FROM schedule_blocks WHERE trip_id = ?1";
const DELETE_BLOCK_SQL: &str = "DELETE FROM schedule_blocks WHERE id = ?1";
const UPDATE_ENRICHMENT_SQL: &str = "UPDATE schedule_blocks SET enrichment = ?1 WHERE id = ?2";

impl super::Database {
    fn build_block_from_row(row: &Row<'_>) -> rusqlite::Result<ScheduleBlock> {
        Ok(ScheduleBlock {
            id: row.get(0)?,
            trip_id: row.get(1)?,
            date: parse_column(row, 2)?,
            start_time: parse_column(row, 3)?,
            duration: row.get(4)?,
            title: row.get(5)?,
            description: row.get(6)?,
            location: row.get(7)?,
            notes: row.get(8)?,
            is_generated: row.get(9)?,
            created_at: parse_column(row, 10)?,
            enrichment: json_column(row, 11)?.unwrap_or_default(),
        })
    }

    fn insert_block_with(
        connection: &rusqlite::Connection,
        block: &ScheduleBlock,
        position: i64,
    ) -> Result<()> {
        let enrichment = encode_enrichment(&block.enrichment)?;
        connection
            .execute(
                INSERT_BLOCK_SQL,
                params![
                    block.id,
                    block.trip_id,
                    block.date.to_string(),
                    block.start_time.to_string(),
                    block.duration,
                    block.title,
                    block.description,
                    block.location,
                    block.notes,
                    block.is_generated,
                    block.created_at.to_string(),
                    enrichment,
                    position,
                ],
            )
            .db_context("Failed to insert schedule block")?;
        Ok(())
    }

    /// All blocks of a trip, ordered by date, start time and insertion.
    pub fn get_blocks(&self, trip_id: &str) -> Result<Vec<ScheduleBlock>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {BLOCK_COLUMNS} FROM schedule_blocks b WHERE b.trip_id = ?1 ORDER BY b.date, b.start_time, b.position"
            ))
            .db_context("Failed to prepare block query")?;

        let blocks = stmt
            .query_map(params![trip_id], Self::build_block_from_row)
            .db_context("Failed to query schedule blocks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read schedule block row")?;
        Ok(blocks)
    }

    /// A block by id, provided its trip belongs to `user_id`.
    pub fn get_block(&self, user_id: &str, id: &str) -> Result<Option<ScheduleBlock>> {
        self.connection
            .query_row(
                &format!(
                    "SELECT {BLOCK_COLUMNS} FROM schedule_blocks b JOIN trips t ON t.id = b.trip_id WHERE b.id = ?1 AND t.user_id = ?2"
                ),
                params![id, user_id],
                Self::build_block_from_row,
            )
            .optional()
            .db_context("Failed to query schedule block")
    }

    /// Replaces a trip's whole schedule in one transaction.
    ///
    /// Blocks keep the order of `blocks` among equal date and start time.
    pub fn replace_blocks(&mut self, trip_id: &str, blocks: &[ScheduleBlock]) -> Result<()> {
        let tx: Transaction<'_> = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_TRIP_BLOCKS_SQL, params![trip_id])
            .db_context("Failed to clear schedule blocks")?;
        for (position, block) in (0_i64..).zip(blocks) {
            Self::insert_block_with(&tx, block, position)?;
        }

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Appends a single block to its trip's schedule.
    pub fn insert_block(&self, block: &ScheduleBlock) -> Result<()> {
        let position: i64 = self
            .connection
            .query_row(NEXT_POSITION_SQL, params![block.trip_id], |row| row.get(0))
            .db_context("Failed to compute block position")?;
        Self::insert_block_with(&self.connection, block, position)
    }

    /// Deletes a block. Returns whether a row matched.
    pub fn delete_block(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_BLOCK_SQL, params![id])
            .db_context("Failed to delete schedule block")?;
        Ok(deleted > 0)
    }

    /// Overwrites a block's enrichment. Returns whether a row matched.
    pub fn update_block_enrichment(&self, id: &str, enrichment: &BlockEnrichment) -> Result<bool> {
        let updated = self
            .connection
            .execute(UPDATE_ENRICHMENT_SQL, params![encode_enrichment(enrichment)?, id])
            .db_context("Failed to update block enrichment")?;
        Ok(updated > 0)
    }
}

fn encode_enrichment(enrichment: &BlockEnrichment) -> Result<Option<String>> {
    if enrichment.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(enrichment)?))
}
