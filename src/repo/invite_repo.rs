use crate::db::{parse_uuid, StoreResult};
use crate::models::Invite;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub struct InviteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> InviteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, invite: &Invite) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO invite (id, team_id, created_at) VALUES (?1, ?2, ?3);",
            params![invite.id.to_string(), invite.team_id.to_string(), invite.created_at],
        )?;
        Ok(())
    }

    /// Looks an invite up by id *and* team; a wrong team reads as absent.
    pub fn find_for_team(&self, team_id: &Uuid, invite_id: &Uuid) -> StoreResult<Option<Invite>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, created_at FROM invite WHERE id = ?1 AND team_id = ?2;",
        )?;
        let mut rows = stmt.query(params![invite_id.to_string(), team_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_invite_row(row)?));
        }
        Ok(None)
    }

    pub fn delete(&self, invite_id: &Uuid) -> StoreResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM invite WHERE id = ?1;", [invite_id.to_string()])?;
        Ok(removed)
    }
}

fn parse_invite_row(row: &Row<'_>) -> StoreResult<Invite> {
    let id: String = row.get(0)?;
    let team_id: String = row.get(1)?;
    Ok(Invite {
        id: parse_uuid(&id, "invite.id")?,
        team_id: parse_uuid(&team_id, "invite.team_id")?,
        created_at: row.get(2)?,
    })
}
