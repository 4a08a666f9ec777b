// src/services/column_service.rs
use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::{Column, EventPayload, TeamEvent};
use crate::repo::ColumnRepository;
use crate::services::EventPublisher;
use log::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ColumnService {
    db: Database,
    events: EventPublisher,
}

impl ColumnService {
    pub fn new(db: Database, events: EventPublisher) -> Self {
        Self { db, events }
    }

    pub fn get_columns(&self, team_id: &Uuid) -> Result<Vec<Column>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(ColumnRepository::new(conn).list_for_team(team_id)?))
    }

    pub fn fetch_column(&self, team_id: &Uuid, column_id: i64) -> Result<Column, ServiceError> {
        self.db
            .with_conn(|conn| Ok::<_, ServiceError>(ColumnRepository::new(conn).find_for_team(team_id, column_id)?))?
            .ok_or_else(|| {
                error!("❌ Column {} not found in team {}", column_id, team_id);
                ServiceError::ColumnNotFound
            })
    }

    pub fn edit_title(&self, team_id: &Uuid, column_id: i64, title: &str) -> Result<Column, ServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::BadRequest("Column title cannot be empty".to_string()));
        }

        let column = self.db.transaction(|tx| {
            let repo = ColumnRepository::new(tx);
            if repo.update_title(team_id, column_id, title)? == 0 {
                return Err(ServiceError::ColumnNotFound);
            }
            repo.find_for_team(team_id, column_id)?
                .ok_or(ServiceError::ColumnNotFound)
        })?;

        info!("✏️ Column {} of team {} renamed to {}", column_id, team_id, column.title);
        self.events
            .publish(TeamEvent::update(*team_id, EventPayload::Column(column.clone())));
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::services::{EventPublisher, TeamService};

    #[test]
    fn edit_title_is_scoped_to_the_team() {
        let db = Database::open_in_memory().unwrap();
        let columns = ColumnService::new(db.clone(), EventPublisher::new(4));
        let teams = TeamService::new(db);
        let alpha = teams.create_team("Alpha", "alice").unwrap();
        let beta = teams.create_team("Beta", "bob").unwrap();

        let alpha_columns = columns.get_columns(&alpha.id).unwrap();
        assert_eq!(alpha_columns.len(), 3);
        let target = alpha_columns[2].id;

        let renamed = columns.edit_title(&alpha.id, target, " Grumpy ").unwrap();
        assert_eq!(renamed.title, "Grumpy");
        assert_eq!(columns.fetch_column(&alpha.id, target).unwrap().title, "Grumpy");

        assert_eq!(columns.edit_title(&beta.id, target, "Hijack"), Err(ServiceError::ColumnNotFound));
        assert_eq!(columns.fetch_column(&beta.id, target), Err(ServiceError::ColumnNotFound));
        assert!(matches!(columns.edit_title(&alpha.id, target, "  "), Err(ServiceError::BadRequest(_))));
    }
}
