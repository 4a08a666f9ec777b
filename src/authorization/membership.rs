use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::Identity;
use crate::repo::MembershipRepository;
use uuid::Uuid;

#[derive(Clone)]
pub struct MembershipChecker {
    db: Database,
}

impl MembershipChecker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn is_member_of_team(&self, identity: &Identity, team_id: &Uuid) -> Result<bool, ServiceError> {
        self.db.with_conn(|conn| {
            Ok(MembershipRepository::new(conn).exists(team_id, &identity.user_id)?)
        })
    }
}
