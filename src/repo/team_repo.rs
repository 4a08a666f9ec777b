use crate::db::{parse_uuid, StoreResult};
use crate::models::Team;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TEAM_SELECT_SQL: &str = "SELECT team.id, team.name, team.created_at FROM team";

pub struct TeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> TeamRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a team; a colliding uri surfaces as `StoreError::UniqueViolation`.
    pub fn insert(&self, team: &Team) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO team (id, name, uri, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![team.id.to_string(), team.name, team.uri(), team.created_at],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} WHERE team.id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_team_row(row)?));
        }
        Ok(None)
    }

    pub fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Team>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEAM_SELECT_SQL}
             JOIN team_user_mapping m ON m.team_id = team.id
             WHERE m.user_id = ?1
             ORDER BY team.name ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }
        Ok(teams)
    }
}

fn parse_team_row(row: &Row<'_>) -> StoreResult<Team> {
    let id: String = row.get(0)?;
    Ok(Team {
        id: parse_uuid(&id, "team.id")?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
