use crate::db::{bool_to_int, int_to_bool, parse_uuid, StoreResult};
use crate::models::ActionItem;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

const ACTION_ITEM_SELECT_SQL: &str = "SELECT
    id,
    team_id,
    task,
    completed,
    archived,
    assignee,
    date_created,
    due_date
FROM action_item";

pub struct ActionItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ActionItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn insert(
        &self,
        team_id: &Uuid,
        task: &str,
        assignee: Option<&str>,
        date_created: NaiveDate,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<ActionItem> {
        self.conn.execute(
            "INSERT INTO action_item (team_id, task, assignee, date_created, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![team_id.to_string(), task, assignee, date_created, due_date],
        )?;
        Ok(ActionItem {
            id: self.conn.last_insert_rowid(),
            team_id: *team_id,
            task: task.to_string(),
            completed: false,
            archived: false,
            assignee: assignee.map(str::to_string),
            date_created,
            due_date,
        })
    }

    /// Lists a team's action items, optionally filtered on `archived`.
    pub fn list(&self, team_id: &Uuid, archived: Option<bool>) -> StoreResult<Vec<ActionItem>> {
        let mut sql = format!("{ACTION_ITEM_SELECT_SQL} WHERE team_id = ?");
        let mut bind_values = vec![Value::Text(team_id.to_string())];

        if let Some(archived) = archived {
            sql.push_str(" AND archived = ?");
            bind_values.push(Value::Integer(bool_to_int(archived)));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_action_item_row(row)?);
        }
        Ok(items)
    }

    pub fn find_for_team(&self, team_id: &Uuid, id: i64) -> StoreResult<Option<ActionItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTION_ITEM_SELECT_SQL} WHERE team_id = ?1 AND id = ?2;"))?;
        let mut rows = stmt.query(params![team_id.to_string(), id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_action_item_row(row)?));
        }
        Ok(None)
    }

    pub fn exists_for_team(&self, team_id: &Uuid, id: i64) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM action_item WHERE team_id = ?1 AND id = ?2;",
                params![team_id.to_string(), id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn save(&self, item: &ActionItem) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE action_item
             SET task = ?1, completed = ?2, archived = ?3, assignee = ?4, due_date = ?5
             WHERE team_id = ?6 AND id = ?7;",
            params![
                item.task,
                bool_to_int(item.completed),
                bool_to_int(item.archived),
                item.assignee,
                item.due_date,
                item.team_id.to_string(),
                item.id,
            ],
        )?;
        Ok(changed)
    }

    pub fn delete_for_team(&self, team_id: &Uuid, id: i64) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM action_item WHERE team_id = ?1 AND id = ?2;",
            params![team_id.to_string(), id],
        )?;
        Ok(removed)
    }

    /// Flips every completed, unarchived item of the team in one statement
    /// and returns the items as they now stand.
    pub fn archive_completed(&self, team_id: &Uuid) -> StoreResult<Vec<ActionItem>> {
        let mut items = Vec::new();
        {
            let mut stmt = self.conn.prepare(&format!(
                "{ACTION_ITEM_SELECT_SQL}
                 WHERE team_id = ?1 AND completed = 1 AND archived = 0
                 ORDER BY id ASC;"
            ))?;
            let mut rows = stmt.query([team_id.to_string()])?;
            while let Some(row) = rows.next()? {
                let mut item = parse_action_item_row(row)?;
                item.archived = true;
                items.push(item);
            }
        }

        self.conn.execute(
            "UPDATE action_item SET archived = 1
             WHERE team_id = ?1 AND completed = 1 AND archived = 0;",
            [team_id.to_string()],
        )?;
        Ok(items)
    }
}

fn parse_action_item_row(row: &Row<'_>) -> StoreResult<ActionItem> {
    let team_id: String = row.get("team_id")?;
    Ok(ActionItem {
        id: row.get("id")?,
        team_id: parse_uuid(&team_id, "action_item.team_id")?,
        task: row.get("task")?,
        completed: int_to_bool(row.get("completed")?, "action_item.completed")?,
        archived: int_to_bool(row.get("archived")?, "action_item.archived")?,
        assignee: row.get("assignee")?,
        date_created: row.get("date_created")?,
        due_date: row.get("due_date")?,
    })
}
