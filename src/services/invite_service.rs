// src/services/invite_service.rs
use crate::db::{Database, StoreError};
use crate::errors::ServiceError;
use crate::models::Invite;
use crate::repo::InviteRepository;
use log::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct InviteService {
    db: Database,
}

impl InviteService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn create_invite(&self, team_id: &Uuid) -> Result<Invite, ServiceError> {
        let invite = Invite::new(*team_id);
        self.db.with_conn(|conn| match InviteRepository::new(conn).insert(&invite) {
            Ok(()) => Ok(()),
            Err(StoreError::ForeignKeyViolation) => {
                error!("❌ Cannot invite to unknown team {}", team_id);
                Err(ServiceError::TeamNotFound)
            }
            Err(err) => Err(err.into()),
        })?;

        info!("✉️ Invite {} created for team {}, expires at {}", invite.id, team_id, invite.expires_at());
        Ok(invite)
    }

    /// Scoped lookup; an invite of another team reads as absent.
    pub fn get_invite(&self, team_id: &Uuid, invite_id: &Uuid) -> Result<Option<Invite>, ServiceError> {
        self.db.with_conn(|conn| {
            Ok(InviteRepository::new(conn).find_for_team(team_id, invite_id)?)
        })
    }

    pub fn delete_invite(&self, invite_id: &Uuid) -> Result<(), ServiceError> {
        let removed = self.db.with_conn(|conn| {
            Ok::<_, ServiceError>(InviteRepository::new(conn).delete(invite_id)?)
        })?;
        info!("🗑️ Deleted {} invite(s) with id {}", removed, invite_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InviteService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::services::TeamService;
    use uuid::Uuid;

    #[test]
    fn invites_are_scoped_to_their_team() {
        let db = Database::open_in_memory().unwrap();
        let teams = TeamService::new(db.clone());
        let invites = InviteService::new(db);
        let alpha = teams.create_team("Alpha", "alice").unwrap();
        let beta = teams.create_team("Beta", "bob").unwrap();

        let invite = invites.create_invite(&alpha.id).unwrap();
        assert_eq!(invites.get_invite(&alpha.id, &invite.id).unwrap(), Some(invite.clone()));
        assert_eq!(invites.get_invite(&beta.id, &invite.id).unwrap(), None);

        invites.delete_invite(&invite.id).unwrap();
        invites.delete_invite(&invite.id).unwrap();
        assert_eq!(invites.get_invite(&alpha.id, &invite.id).unwrap(), None);
    }

    #[test]
    fn invite_for_unknown_team_is_team_not_found() {
        let invites = InviteService::new(Database::open_in_memory().unwrap());
        assert_eq!(invites.create_invite(&Uuid::new_v4()), Err(ServiceError::TeamNotFound));
    }
}
