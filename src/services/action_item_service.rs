// src/services/action_item_service.rs
use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::{ActionItem, CreateActionItemRequest, EventPayload, ResourceKind, TeamEvent};
use crate::repo::ActionItemRepository;
use crate::services::EventPublisher;
use chrono::Utc;
use log::{error, info};
use rusqlite::Connection;
use uuid::Uuid;

#[derive(Clone)]
pub struct ActionItemService {
    db: Database,
    events: EventPublisher,
}

impl ActionItemService {
    pub fn new(db: Database, events: EventPublisher) -> Self {
        Self { db, events }
    }

    pub fn create_action_item(
        &self,
        team_id: &Uuid,
        request: &CreateActionItemRequest,
    ) -> Result<ActionItem, ServiceError> {
        let task = request.task.trim();
        if task.is_empty() {
            return Err(ServiceError::BadRequest("Action item task cannot be empty".to_string()));
        }

        let item = self.db.with_conn(|conn| {
            Ok::<_, ServiceError>(ActionItemRepository::new(conn).insert(
                team_id,
                task,
                request.assignee.as_deref(),
                Utc::now().date_naive(),
                request.due_date,
            )?)
        })?;

        info!("📌 Action item {} created for team {}", item.id, team_id);
        self.publish_update(&item);
        Ok(item)
    }

    /// All of the team's items, or only the archived / unarchived ones.
    pub fn get_action_items(&self, team_id: &Uuid, archived: Option<bool>) -> Result<Vec<ActionItem>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(ActionItemRepository::new(conn).list(team_id, archived)?))
    }

    pub fn fetch_action_item(&self, team_id: &Uuid, id: i64) -> Result<ActionItem, ServiceError> {
        self.db
            .with_conn(|conn| find_action_item(&ActionItemRepository::new(conn), team_id, id))
    }

    pub fn update_completed_status(&self, team_id: &Uuid, id: i64, completed: bool) -> Result<ActionItem, ServiceError> {
        self.modify(team_id, id, |item| {
            item.completed = completed;
            Ok(())
        })
    }

    pub fn update_task(&self, team_id: &Uuid, id: i64, task: &str) -> Result<ActionItem, ServiceError> {
        self.modify(team_id, id, |item| {
            let task = task.trim();
            if task.is_empty() {
                return Err(ServiceError::BadRequest("Action item task cannot be empty".to_string()));
            }
            item.task = task.to_string();
            Ok(())
        })
    }

    pub fn update_assignee(&self, team_id: &Uuid, id: i64, assignee: Option<&str>) -> Result<ActionItem, ServiceError> {
        self.modify(team_id, id, |item| {
            item.assignee = assignee
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            Ok(())
        })
    }

    pub fn update_archived_status(&self, team_id: &Uuid, id: i64, archived: bool) -> Result<ActionItem, ServiceError> {
        self.modify(team_id, id, |item| {
            item.archived = archived;
            Ok(())
        })
    }

    pub fn delete_one(&self, team_id: &Uuid, id: i64) -> Result<(), ServiceError> {
        let removed = self.db.with_conn(|conn| {
            Ok::<_, ServiceError>(ActionItemRepository::new(conn).delete_for_team(team_id, id)?)
        })?;
        if removed == 0 {
            return Err(ServiceError::ActionItemNotFound);
        }

        info!("🗑️ Action item {} deleted from team {}", id, team_id);
        self.events
            .publish(TeamEvent::delete(*team_id, ResourceKind::ActionItem, id));
        Ok(())
    }

    /// Deletes the listed items the team owns; ids of other teams are skipped.
    pub fn delete_multiple(&self, team_id: &Uuid, ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
        let deleted = self.db.transaction(|tx| {
            let repo = ActionItemRepository::new(tx);
            let mut deleted = Vec::new();
            for id in ids {
                if repo.delete_for_team(team_id, *id)? > 0 {
                    deleted.push(*id);
                }
            }
            Ok::<_, ServiceError>(deleted)
        })?;

        info!(
            "🗑️ Deleted {} of {} requested action items from team {}",
            deleted.len(),
            ids.len(),
            team_id
        );
        for id in &deleted {
            self.events
                .publish(TeamEvent::delete(*team_id, ResourceKind::ActionItem, *id));
        }
        Ok(deleted)
    }

    /// Archives every completed, unarchived item in one statement.
    pub fn archive_completed_action_items(&self, team_id: &Uuid) -> Result<Vec<ActionItem>, ServiceError> {
        let archived = self
            .db
            .transaction(|tx| archive_completed_in(tx, team_id))?;
        self.announce(&archived);
        Ok(archived)
    }

    /// Publishes an UPDATE for each item, once its change is committed.
    pub(crate) fn announce(&self, items: &[ActionItem]) {
        for item in items {
            self.publish_update(item);
        }
    }

    fn modify(
        &self,
        team_id: &Uuid,
        id: i64,
        change: impl FnOnce(&mut ActionItem) -> Result<(), ServiceError>,
    ) -> Result<ActionItem, ServiceError> {
        let item = self.db.transaction(|tx| {
            let repo = ActionItemRepository::new(tx);
            let mut item = find_action_item(&repo, team_id, id)?;
            change(&mut item)?;
            repo.save(&item)?;
            Ok::<_, ServiceError>(item)
        })?;

        self.publish_update(&item);
        Ok(item)
    }

    fn publish_update(&self, item: &ActionItem) {
        self.events
            .publish(TeamEvent::update(item.team_id, EventPayload::ActionItem(item.clone())));
    }
}

/// Archive step shared with the end of a retro, run on the caller's
/// connection so it joins the caller's transaction.
pub(crate) fn archive_completed_in(conn: &Connection, team_id: &Uuid) -> Result<Vec<ActionItem>, ServiceError> {
    let archived = ActionItemRepository::new(conn).archive_completed(team_id)?;
    info!("📦 Archived {} completed action items of team {}", archived.len(), team_id);
    Ok(archived)
}

fn find_action_item(repo: &ActionItemRepository<'_>, team_id: &Uuid, id: i64) -> Result<ActionItem, ServiceError> {
    repo.find_for_team(team_id, id)?.ok_or_else(|| {
        error!("❌ Action item {} not found in team {}", id, team_id);
        ServiceError::ActionItemNotFound
    })
}
