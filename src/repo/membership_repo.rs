use crate::db::{parse_uuid, StoreResult};
use crate::models::Membership;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

pub struct MembershipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MembershipRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a mapping; duplicates surface as `UniqueViolation`, unknown
    /// teams as `ForeignKeyViolation`.
    pub fn insert(&self, team_id: &Uuid, user_id: &str, created_at: DateTime<Utc>) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO team_user_mapping (team_id, user_id, created_at) VALUES (?1, ?2, ?3);",
            params![team_id.to_string(), user_id, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete(&self, team_id: &Uuid, user_id: &str) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM team_user_mapping WHERE team_id = ?1 AND user_id = ?2;",
            params![team_id.to_string(), user_id],
        )?;
        Ok(removed)
    }

    pub fn exists(&self, team_id: &Uuid, user_id: &str) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM team_user_mapping WHERE team_id = ?1 AND user_id = ?2;",
                params![team_id.to_string(), user_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn list_for_team(&self, team_id: &Uuid) -> StoreResult<Vec<Membership>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, user_id, created_at
             FROM team_user_mapping
             WHERE team_id = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;
        let mut rows = stmt.query([team_id.to_string()])?;
        let mut memberships = Vec::new();
        while let Some(row) = rows.next()? {
            memberships.push(parse_membership_row(row)?);
        }
        Ok(memberships)
    }
}

fn parse_membership_row(row: &Row<'_>) -> StoreResult<Membership> {
    let team_id: String = row.get(1)?;
    Ok(Membership {
        id: row.get(0)?,
        team_id: parse_uuid(&team_id, "team_user_mapping.team_id")?,
        user_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}
