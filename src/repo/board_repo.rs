use crate::db::{bool_to_int, int_to_bool, parse_uuid, StoreError, StoreResult};
use crate::models::Column;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const BOARD_SELECT_SQL: &str = "SELECT
    id,
    team_id,
    created_at,
    description,
    active,
    columns_snapshot
FROM board";

/// A board row without its thoughts; the service assembles the full view.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRecord {
    pub id: i64,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub active: bool,
    pub columns: Vec<Column>,
}

pub struct BoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> BoardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn insert(
        &self,
        team_id: &Uuid,
        description: &str,
        active: bool,
        created_at: DateTime<Utc>,
    ) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO board (team_id, created_at, description, active) VALUES (?1, ?2, ?3, ?4);",
            params![team_id.to_string(), created_at, description, bool_to_int(active)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_for_team(&self, team_id: &Uuid, board_id: i64) -> StoreResult<Option<BoardRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} WHERE team_id = ?1 AND id = ?2;"))?;
        let mut rows = stmt.query(params![team_id.to_string(), board_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }
        Ok(None)
    }

    /// The team's open board, if a retro has been started and not ended.
    pub fn find_active(&self, team_id: &Uuid) -> StoreResult<Option<BoardRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOARD_SELECT_SQL} WHERE team_id = ?1 AND active = 1 ORDER BY id DESC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([team_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }
        Ok(None)
    }

    /// Newest first.
    pub fn list_for_team(&self, team_id: &Uuid, limit: u32, offset: u32) -> StoreResult<Vec<BoardRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOARD_SELECT_SQL}
             WHERE team_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut rows = stmt.query(params![team_id.to_string(), limit, offset])?;
        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(parse_board_row(row)?);
        }
        Ok(boards)
    }

    pub fn exists_for_team(&self, team_id: &Uuid, board_id: i64) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM board WHERE team_id = ?1 AND id = ?2;",
                params![team_id.to_string(), board_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Freezes the column layout onto the board and marks it inactive.
    pub fn close(&self, board_id: i64, columns: &[Column]) -> StoreResult<usize> {
        let snapshot = serde_json::to_string(columns)
            .map_err(|err| StoreError::InvalidData(format!("cannot encode column snapshot: {err}")))?;
        let changed = self.conn.execute(
            "UPDATE board SET active = 0, columns_snapshot = ?1 WHERE id = ?2;",
            params![snapshot, board_id],
        )?;
        Ok(changed)
    }

    pub fn delete_for_team(&self, team_id: &Uuid, board_id: i64) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM board WHERE team_id = ?1 AND id = ?2;",
            params![team_id.to_string(), board_id],
        )?;
        Ok(removed)
    }
}

fn parse_board_row(row: &Row<'_>) -> StoreResult<BoardRecord> {
    let team_id: String = row.get("team_id")?;
    let snapshot: String = row.get("columns_snapshot")?;
    let columns = serde_json::from_str(&snapshot).map_err(|err| {
        StoreError::InvalidData(format!("invalid board.columns_snapshot: {err}"))
    })?;

    Ok(BoardRecord {
        id: row.get("id")?,
        team_id: parse_uuid(&team_id, "board.team_id")?,
        created_at: row.get("created_at")?,
        description: row.get("description")?,
        active: int_to_bool(row.get("active")?, "board.active")?,
        columns,
    })
}
