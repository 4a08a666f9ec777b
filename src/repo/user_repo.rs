use crate::db::StoreResult;
use crate::models::User;
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT id, email, password_hash, created_at FROM app_user";

pub struct UserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> UserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// A taken email surfaces as `StoreError::UniqueViolation`.
    pub fn insert(&self, user: &User) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO app_user (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![user.id, user.email, user.password_hash, user.created_at],
        )?;
        Ok(())
    }

    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_one(&format!("{USER_SELECT_SQL} WHERE email = ?1;"), email)
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.find_one(&format!("{USER_SELECT_SQL} WHERE id = ?1;"), id)
    }

    fn find_one(&self, sql: &str, key: &str) -> StoreResult<Option<User>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}
