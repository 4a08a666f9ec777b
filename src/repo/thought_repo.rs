use crate::db::{bool_to_int, int_to_bool, parse_uuid, StoreResult};
use crate::models::Thought;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const THOUGHT_SELECT_SQL: &str = "SELECT
    id,
    team_id,
    board_id,
    column_id,
    message,
    heart_count,
    discussed
FROM thought";

pub struct ThoughtRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ThoughtRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts an active (board-less) thought and returns it.
    pub fn insert(&self, team_id: &Uuid, column_id: i64, message: &str) -> StoreResult<Thought> {
        self.conn.execute(
            "INSERT INTO thought (team_id, column_id, message) VALUES (?1, ?2, ?3);",
            params![team_id.to_string(), column_id, message],
        )?;
        Ok(Thought {
            id: self.conn.last_insert_rowid(),
            team_id: *team_id,
            board_id: None,
            column_id,
            message: message.to_string(),
            heart_count: 0,
            discussed: false,
        })
    }

    pub fn list_active(&self, team_id: &Uuid) -> StoreResult<Vec<Thought>> {
        self.list(
            &format!("{THOUGHT_SELECT_SQL} WHERE team_id = ?1 AND board_id IS NULL ORDER BY id ASC;"),
            params![team_id.to_string()],
        )
    }

    pub fn list_for_board(&self, team_id: &Uuid, board_id: i64) -> StoreResult<Vec<Thought>> {
        self.list(
            &format!("{THOUGHT_SELECT_SQL} WHERE team_id = ?1 AND board_id = ?2 ORDER BY id ASC;"),
            params![team_id.to_string(), board_id],
        )
    }

    pub fn find_for_team(&self, team_id: &Uuid, thought_id: i64) -> StoreResult<Option<Thought>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{THOUGHT_SELECT_SQL} WHERE team_id = ?1 AND id = ?2;"))?;
        let mut rows = stmt.query(params![team_id.to_string(), thought_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_thought_row(row)?));
        }
        Ok(None)
    }

    pub fn exists_for_team(&self, team_id: &Uuid, thought_id: i64) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM thought WHERE team_id = ?1 AND id = ?2;",
                params![team_id.to_string(), thought_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Single-statement increment; concurrent likes never lose updates.
    pub fn increment_heart_count(&self, team_id: &Uuid, thought_id: i64) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE thought SET heart_count = heart_count + 1 WHERE team_id = ?1 AND id = ?2;",
            params![team_id.to_string(), thought_id],
        )?;
        Ok(changed)
    }

    /// Persists the mutable fields of a thought, scoped by its team.
    pub fn save(&self, thought: &Thought) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE thought
             SET column_id = ?1, message = ?2, discussed = ?3
             WHERE team_id = ?4 AND id = ?5;",
            params![
                thought.column_id,
                thought.message,
                bool_to_int(thought.discussed),
                thought.team_id.to_string(),
                thought.id,
            ],
        )?;
        Ok(changed)
    }

    pub fn delete_for_team(&self, team_id: &Uuid, thought_id: i64) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM thought WHERE team_id = ?1 AND id = ?2;",
            params![team_id.to_string(), thought_id],
        )?;
        Ok(removed)
    }

    /// Moves every active thought of the team onto `board_id`.
    pub fn archive_active(&self, team_id: &Uuid, board_id: i64) -> StoreResult<usize> {
        let moved = self.conn.execute(
            "UPDATE thought SET board_id = ?1 WHERE team_id = ?2 AND board_id IS NULL;",
            params![board_id, team_id.to_string()],
        )?;
        Ok(moved)
    }

    fn list(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> StoreResult<Vec<Thought>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut thoughts = Vec::new();
        while let Some(row) = rows.next()? {
            thoughts.push(parse_thought_row(row)?);
        }
        Ok(thoughts)
    }
}

fn parse_thought_row(row: &Row<'_>) -> StoreResult<Thought> {
    let team_id: String = row.get("team_id")?;
    Ok(Thought {
        id: row.get("id")?,
        team_id: parse_uuid(&team_id, "thought.team_id")?,
        board_id: row.get("board_id")?,
        column_id: row.get("column_id")?,
        message: row.get("message")?,
        heart_count: row.get("heart_count")?,
        discussed: int_to_bool(row.get("discussed")?, "thought.discussed")?,
    })
}
