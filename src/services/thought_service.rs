// src/services/thought_service.rs
use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::{EventPayload, ResourceKind, TeamEvent, Thought};
use crate::repo::{ColumnRepository, ThoughtRepository};
use crate::services::EventPublisher;
use log::{error, info};
use uuid::Uuid;

/// Thoughts of the running retro. Every lookup is keyed by `(team_id, id)`.
#[derive(Clone)]
pub struct ThoughtService {
    db: Database,
    events: EventPublisher,
}

impl ThoughtService {
    pub fn new(db: Database, events: EventPublisher) -> Self {
        Self { db, events }
    }

    pub fn create_thought(&self, team_id: &Uuid, message: &str, column_id: i64) -> Result<Thought, ServiceError> {
        let thought = self.db.transaction(|tx| {
            ensure_column(&ColumnRepository::new(tx), team_id, column_id)?;
            Ok::<_, ServiceError>(ThoughtRepository::new(tx).insert(team_id, column_id, message)?)
        })?;

        info!("💭 Thought {} added to column {} of team {}", thought.id, column_id, team_id);
        self.publish_update(&thought);
        Ok(thought)
    }

    pub fn fetch_all_active_thoughts(&self, team_id: &Uuid) -> Result<Vec<Thought>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(ThoughtRepository::new(conn).list_active(team_id)?))
    }

    pub fn fetch_thought(&self, team_id: &Uuid, thought_id: i64) -> Result<Thought, ServiceError> {
        self.db.with_conn(|conn| find_thought(&ThoughtRepository::new(conn), team_id, thought_id))
    }

    /// Increments in SQL so concurrent likes are never lost.
    pub fn like_thought(&self, team_id: &Uuid, thought_id: i64) -> Result<Thought, ServiceError> {
        let thought = self.db.transaction(|tx| {
            let repo = ThoughtRepository::new(tx);
            if repo.increment_heart_count(team_id, thought_id)? == 0 {
                return Err(ServiceError::ThoughtNotFound(thought_id));
            }
            find_thought(&repo, team_id, thought_id)
        })?;

        self.publish_update(&thought);
        Ok(thought)
    }

    pub fn discuss_thought(&self, team_id: &Uuid, thought_id: i64, discussed: bool) -> Result<Thought, ServiceError> {
        self.modify(team_id, thought_id, |thought| {
            thought.discussed = discussed;
            Ok(())
        })
    }

    pub fn update_thought_message(&self, team_id: &Uuid, thought_id: i64, message: &str) -> Result<Thought, ServiceError> {
        self.modify(team_id, thought_id, |thought| {
            thought.message = message.to_string();
            Ok(())
        })
    }

    /// Moves a thought to another column of the same team.
    pub fn update_column(&self, team_id: &Uuid, thought_id: i64, column_id: i64) -> Result<Thought, ServiceError> {
        let thought = self.db.transaction(|tx| {
            ensure_column(&ColumnRepository::new(tx), team_id, column_id)?;
            let repo = ThoughtRepository::new(tx);
            let mut thought = find_thought(&repo, team_id, thought_id)?;
            thought.column_id = column_id;
            repo.save(&thought)?;
            Ok::<_, ServiceError>(thought)
        })?;

        self.publish_update(&thought);
        Ok(thought)
    }

    pub fn delete_thought(&self, team_id: &Uuid, thought_id: i64) -> Result<(), ServiceError> {
        let removed = self.db.with_conn(|conn| {
            Ok::<_, ServiceError>(ThoughtRepository::new(conn).delete_for_team(team_id, thought_id)?)
        })?;
        if removed == 0 {
            return Err(ServiceError::ThoughtNotFound(thought_id));
        }

        info!("🗑️ Thought {} deleted from team {}", thought_id, team_id);
        self.events
            .publish(TeamEvent::delete(*team_id, ResourceKind::Thought, thought_id));
        Ok(())
    }

    fn modify(
        &self,
        team_id: &Uuid,
        thought_id: i64,
        change: impl FnOnce(&mut Thought) -> Result<(), ServiceError>,
    ) -> Result<Thought, ServiceError> {
        let thought = self.db.transaction(|tx| {
            let repo = ThoughtRepository::new(tx);
            let mut thought = find_thought(&repo, team_id, thought_id)?;
            change(&mut thought)?;
            repo.save(&thought)?;
            Ok::<_, ServiceError>(thought)
        })?;

        self.publish_update(&thought);
        Ok(thought)
    }

    fn publish_update(&self, thought: &Thought) {
        self.events.publish(TeamEvent::update(
            thought.team_id,
            EventPayload::Thought(thought.clone()),
        ));
    }
}

fn find_thought(repo: &ThoughtRepository<'_>, team_id: &Uuid, thought_id: i64) -> Result<Thought, ServiceError> {
    repo.find_for_team(team_id, thought_id)?.ok_or_else(|| {
        error!("❌ Thought {} not found in team {}", thought_id, team_id);
        ServiceError::ThoughtNotFound(thought_id)
    })
}

fn ensure_column(repo: &ColumnRepository<'_>, team_id: &Uuid, column_id: i64) -> Result<(), ServiceError> {
    if repo.exists_for_team(team_id, column_id)? {
        return Ok(());
    }
    error!("❌ Column {} does not belong to team {}", column_id, team_id);
    Err(ServiceError::ColumnNotFound)
}

#[cfg(test)]
mod tests {
    use super::ThoughtService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::models::{EventPayload, EventType, Team};
    use crate::repo::ColumnRepository;
    use crate::services::{EventPublisher, TeamService};

    fn setup() -> (Database, EventPublisher, ThoughtService) {
        let db = Database::open_in_memory().unwrap();
        let events = EventPublisher::new(16);
        let thoughts = ThoughtService::new(db.clone(), events.clone());
        (db, events, thoughts)
    }

    fn team_with_column(db: &Database, name: &str) -> (Team, i64) {
        let team = TeamService::new(db.clone()).create_team(name, "owner").unwrap();
        let columns = db
            .with_conn(|conn| ColumnRepository::new(conn).list_for_team(&team.id))
            .unwrap();
        (team, columns[0].id)
    }

    #[test]
    fn thought_lifecycle_publishes_events() {
        let (db, events, thoughts) = setup();
        let (team, column_id) = team_with_column(&db, "Alpha");
        let mut receiver = events.subscribe();

        let thought = thoughts.create_thought(&team.id, "more pairing", column_id).unwrap();
        assert!(thought.is_active());
        let created = receiver.try_recv().unwrap();
        assert_eq!(created.event_type, EventType::Update);
        assert_eq!(created.payload, EventPayload::Thought(thought.clone()));

        let liked = thoughts.like_thought(&team.id, thought.id).unwrap();
        assert_eq!(liked.heart_count, 1);
        let discussed = thoughts.discuss_thought(&team.id, thought.id, true).unwrap();
        assert!(discussed.discussed);
        let renamed = thoughts.update_thought_message(&team.id, thought.id, "less meetings").unwrap();
        assert_eq!(renamed.message, "less meetings");
        assert_eq!(renamed.heart_count, 1);

        thoughts.delete_thought(&team.id, thought.id).unwrap();
        assert!(thoughts.fetch_all_active_thoughts(&team.id).unwrap().is_empty());
    }

    #[test]
    fn thoughts_of_other_teams_are_not_found() {
        let (db, _, thoughts) = setup();
        let (alpha, alpha_column) = team_with_column(&db, "Alpha");
        let (beta, _) = team_with_column(&db, "Beta");
        let thought = thoughts.create_thought(&alpha.id, "secret", alpha_column).unwrap();

        assert_eq!(
            thoughts.like_thought(&beta.id, thought.id),
            Err(ServiceError::ThoughtNotFound(thought.id))
        );
        assert_eq!(
            thoughts.delete_thought(&beta.id, thought.id),
            Err(ServiceError::ThoughtNotFound(thought.id))
        );
        assert_eq!(thoughts.fetch_thought(&alpha.id, thought.id).unwrap().heart_count, 0);
    }

    #[test]
    fn moving_into_a_foreign_column_leaves_thought_untouched() {
        let (db, _, thoughts) = setup();
        let (alpha, alpha_column) = team_with_column(&db, "Alpha");
        let (_, beta_column) = team_with_column(&db, "Beta");
        let thought = thoughts.create_thought(&alpha.id, "stay here", alpha_column).unwrap();

        assert_eq!(
            thoughts.update_column(&alpha.id, thought.id, beta_column),
            Err(ServiceError::ColumnNotFound)
        );
        assert_eq!(
            thoughts.create_thought(&alpha.id, "nope", beta_column),
            Err(ServiceError::ColumnNotFound)
        );
        assert_eq!(thoughts.fetch_thought(&alpha.id, thought.id).unwrap().column_id, alpha_column);
    }
}
