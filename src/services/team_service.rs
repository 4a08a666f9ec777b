// src/services/team_service.rs
use crate::db::{Database, StoreError};
use crate::errors::ServiceError;
use crate::models::{validate_team_name, Membership, Team};
use crate::repo::{ColumnRepository, InviteRepository, MembershipRepository, TeamRepository};
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

/// Team lifecycle: creation, lookup and membership changes.
#[derive(Clone)]
pub struct TeamService {
    db: Database,
}

impl TeamService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates the team, the creator's membership and the default columns
    /// in one transaction. Name collisions are decided by the uri constraint.
    pub fn create_team(&self, name: &str, creator_user_id: &str) -> Result<Team, ServiceError> {
        validate_team_name(name)?;
        let team = Team::new(name);

        self.db.transaction(|tx| {
            match TeamRepository::new(tx).insert(&team) {
                Ok(()) => {}
                Err(StoreError::UniqueViolation) => {
                    error!("❌ Team uri already taken: {}", team.uri());
                    return Err(ServiceError::TeamAlreadyExists);
                }
                Err(err) => return Err(err.into()),
            }
            MembershipRepository::new(tx).insert(&team.id, creator_user_id, team.created_at)?;
            ColumnRepository::new(tx).insert_defaults(&team.id)?;
            Ok(())
        })?;

        info!("✅ Team created: {} ({})", team.name, team.id);
        Ok(team)
    }

    pub fn get_team(&self, team_id: &Uuid) -> Result<Option<Team>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(TeamRepository::new(conn).find_by_id(team_id)?))
    }

    pub fn list_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(TeamRepository::new(conn).list_for_user(user_id)?))
    }

    pub fn list_members(&self, team_id: &Uuid) -> Result<Vec<Membership>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(MembershipRepository::new(conn).list_for_team(team_id)?))
    }

    /// Joins `user_id` to the team through an invite of that same team.
    ///
    /// Invites stay usable until they expire; joining twice is a no-op.
    pub fn add_user(&self, team_id: &Uuid, user_id: &str, invite_id: &Uuid) -> Result<(), ServiceError> {
        self.db.transaction(|tx| {
            let invite = InviteRepository::new(tx)
                .find_for_team(team_id, invite_id)?
                .ok_or_else(|| {
                    error!("❌ Invite {} not found for team {}", invite_id, team_id);
                    ServiceError::InviteNotFound
                })?;

            if invite.is_expired() {
                error!("❌ Invite {} expired at {}", invite.id, invite.expires_at());
                return Err(ServiceError::InviteExpired);
            }

            match MembershipRepository::new(tx).insert(team_id, user_id, Utc::now()) {
                Ok(_) => {
                    info!("✅ User {} joined team {}", user_id, team_id);
                    Ok(())
                }
                Err(StoreError::UniqueViolation) => {
                    info!("User {} is already a member of team {}", user_id, team_id);
                    Ok(())
                }
                Err(StoreError::ForeignKeyViolation) => Err(ServiceError::TeamNotFound),
                Err(err) => Err(err.into()),
            }
        })
    }

    /// Removing a user who is not a member succeeds.
    pub fn remove_user(&self, team_id: &Uuid, user_id: &str) -> Result<(), ServiceError> {
        let removed = self
            .db
            .with_conn(|conn| Ok::<_, ServiceError>(MembershipRepository::new(conn).delete(team_id, user_id)?))?;
        info!("🗑️ Removed {} membership(s) of user {} from team {}", removed, user_id, team_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TeamService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::models::{Invite, DEFAULT_COLUMNS};
    use crate::repo::{ColumnRepository, InviteRepository};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn service() -> (Database, TeamService) {
        let db = Database::open_in_memory().unwrap();
        (db.clone(), TeamService::new(db))
    }

    fn store_invite(db: &Database, invite: &Invite) {
        db.with_conn(|conn| InviteRepository::new(conn).insert(invite)).unwrap();
    }

    #[test]
    fn create_team_adds_owner_and_default_columns() {
        let (db, teams) = service();
        let team = teams.create_team("Team Alpha", "alice").unwrap();

        let members = teams.list_members(&team.id).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, "alice");

        let columns = db
            .with_conn(|conn| ColumnRepository::new(conn).list_for_team(&team.id))
            .unwrap();
        let topics: Vec<&str> = columns.iter().map(|c| c.topic.as_str()).collect();
        let expected: Vec<&str> = DEFAULT_COLUMNS.iter().map(|(topic, _)| *topic).collect();
        assert_eq!(topics, expected);
    }

    #[test]
    fn colliding_uri_is_rejected_without_partial_writes() {
        let (_, teams) = service();
        teams.create_team("Team Alpha", "alice").unwrap();

        let err = teams.create_team(" team alpha ", "bob").unwrap_err();
        assert_eq!(err, ServiceError::TeamAlreadyExists);
        assert!(teams.list_teams_for_user("bob").unwrap().is_empty());
    }

    #[test]
    fn invalid_names_are_bad_requests() {
        let (_, teams) = service();
        assert!(matches!(teams.create_team("   ", "alice"), Err(ServiceError::BadRequest(_))));
        assert!(matches!(teams.create_team("a/b", "alice"), Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn accented_and_punctuated_names_are_accepted() {
        let (_, teams) = service();
        let rouge = teams.create_team("Équipe Rouge", "alice").unwrap();
        assert_eq!(rouge.name, "Équipe Rouge");
        teams.create_team("R&D", "alice").unwrap();
        assert_eq!(teams.list_teams_for_user("alice").unwrap().len(), 2);
    }

    #[test]
    fn get_team_returns_none_for_unknown_id() {
        let (_, teams) = service();
        assert_eq!(teams.get_team(&Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn add_user_honours_invite_window() {
        let (db, teams) = service();
        let team = teams.create_team("Team Alpha", "alice").unwrap();

        let fresh = Invite::new(team.id);
        store_invite(&db, &fresh);
        teams.add_user(&team.id, "bob", &fresh.id).unwrap();
        // Invites are multi-use and re-joining is silent
        teams.add_user(&team.id, "carol", &fresh.id).unwrap();
        teams.add_user(&team.id, "bob", &fresh.id).unwrap();
        assert_eq!(teams.list_members(&team.id).unwrap().len(), 3);

        let stale = Invite {
            created_at: Utc::now() - Duration::hours(3) - Duration::minutes(1),
            ..Invite::new(team.id)
        };
        store_invite(&db, &stale);
        assert_eq!(
            teams.add_user(&team.id, "dave", &stale.id),
            Err(ServiceError::InviteExpired)
        );
    }

    #[test]
    fn invite_of_another_team_is_not_found() {
        let (db, teams) = service();
        let alpha = teams.create_team("Alpha", "alice").unwrap();
        let beta = teams.create_team("Beta", "bob").unwrap();

        let invite = Invite::new(beta.id);
        store_invite(&db, &invite);
        assert_eq!(
            teams.add_user(&alpha.id, "mallory", &invite.id),
            Err(ServiceError::InviteNotFound)
        );
    }

    #[test]
    fn remove_user_is_idempotent() {
        let (_, teams) = service();
        let team = teams.create_team("Team Alpha", "alice").unwrap();

        teams.remove_user(&team.id, "alice").unwrap();
        teams.remove_user(&team.id, "alice").unwrap();
        teams.remove_user(&team.id, "nobody").unwrap();
        assert!(teams.list_members(&team.id).unwrap().is_empty());
    }
}
