use crate::db::{parse_uuid, StoreResult};
use crate::models::{Column, DEFAULT_COLUMNS};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

pub struct ColumnRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ColumnRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates the fixed default column set for a freshly created team.
    pub fn insert_defaults(&self, team_id: &Uuid) -> StoreResult<Vec<Column>> {
        let mut columns = Vec::with_capacity(DEFAULT_COLUMNS.len());
        for (topic, title) in DEFAULT_COLUMNS {
            self.conn.execute(
                "INSERT INTO team_column (team_id, topic, title) VALUES (?1, ?2, ?3);",
                params![team_id.to_string(), topic, title],
            )?;
            columns.push(Column {
                id: self.conn.last_insert_rowid(),
                team_id: *team_id,
                topic: topic.to_string(),
                title: title.to_string(),
            });
        }
        Ok(columns)
    }

    pub fn list_for_team(&self, team_id: &Uuid) -> StoreResult<Vec<Column>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, topic, title FROM team_column WHERE team_id = ?1 ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([team_id.to_string()])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(parse_column_row(row)?);
        }
        Ok(columns)
    }

    pub fn find_for_team(&self, team_id: &Uuid, column_id: i64) -> StoreResult<Option<Column>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, topic, title FROM team_column WHERE team_id = ?1 AND id = ?2;",
        )?;
        let mut rows = stmt.query(params![team_id.to_string(), column_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_column_row(row)?));
        }
        Ok(None)
    }

    pub fn exists_for_team(&self, team_id: &Uuid, column_id: i64) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM team_column WHERE team_id = ?1 AND id = ?2;",
                params![team_id.to_string(), column_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn update_title(&self, team_id: &Uuid, column_id: i64, title: &str) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE team_column SET title = ?1 WHERE team_id = ?2 AND id = ?3;",
            params![title, team_id.to_string(), column_id],
        )?;
        Ok(changed)
    }
}

fn parse_column_row(row: &Row<'_>) -> StoreResult<Column> {
    let team_id: String = row.get(1)?;
    Ok(Column {
        id: row.get(0)?,
        team_id: parse_uuid(&team_id, "team_column.team_id")?,
        topic: row.get(2)?,
        title: row.get(3)?,
    })
}
