use crate::db::{Database, StoreResult};
use crate::errors::ServiceError;
use crate::models::{ActionItem, Board, Column, Identity, ResourceKind, Thought};
use crate::repo::{ActionItemRepository, BoardRepository, ColumnRepository, ThoughtRepository};
use rusqlite::Connection;
use std::marker::PhantomData;
use uuid::Uuid;

use super::MembershipChecker;

/// A team sub-resource addressable by `(team_id, id)`.
pub trait OwnedResource {
    const KIND: ResourceKind;

    /// Team-scoped existence check; an id owned by another team is `false`.
    fn belongs_to_team(conn: &Connection, team_id: &Uuid, id: i64) -> StoreResult<bool>;
}

impl OwnedResource for Thought {
    const KIND: ResourceKind = ResourceKind::Thought;

    fn belongs_to_team(conn: &Connection, team_id: &Uuid, id: i64) -> StoreResult<bool> {
        ThoughtRepository::new(conn).exists_for_team(team_id, id)
    }
}

impl OwnedResource for Column {
    const KIND: ResourceKind = ResourceKind::Column;

    fn belongs_to_team(conn: &Connection, team_id: &Uuid, id: i64) -> StoreResult<bool> {
        ColumnRepository::new(conn).exists_for_team(team_id, id)
    }
}

impl OwnedResource for ActionItem {
    const KIND: ResourceKind = ResourceKind::ActionItem;

    fn belongs_to_team(conn: &Connection, team_id: &Uuid, id: i64) -> StoreResult<bool> {
        ActionItemRepository::new(conn).exists_for_team(team_id, id)
    }
}

impl OwnedResource for Board {
    const KIND: ResourceKind = ResourceKind::Board;

    fn belongs_to_team(conn: &Connection, team_id: &Uuid, id: i64) -> StoreResult<bool> {
        BoardRepository::new(conn).exists_for_team(team_id, id)
    }
}

/// Membership check followed by a team-scoped ownership check for `R`.
pub struct ResourceOwnershipChecker<R: OwnedResource> {
    db: Database,
    membership: MembershipChecker,
    _resource: PhantomData<fn() -> R>,
}

impl<R: OwnedResource> Clone for ResourceOwnershipChecker<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            membership: self.membership.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: OwnedResource> ResourceOwnershipChecker<R> {
    pub fn new(db: Database) -> Self {
        Self {
            membership: MembershipChecker::new(db.clone()),
            db,
            _resource: PhantomData,
        }
    }

    pub fn request_is_authorized(
        &self,
        identity: &Identity,
        team_id: &Uuid,
        resource_id: i64,
    ) -> Result<bool, ServiceError> {
        if !self.membership.is_member_of_team(identity, team_id)? {
            return Ok(false);
        }
        self.resource_belongs_to_team(team_id, resource_id)
    }

    pub fn resource_belongs_to_team(&self, team_id: &Uuid, resource_id: i64) -> Result<bool, ServiceError> {
        self.db
            .with_conn(|conn| Ok(R::belongs_to_team(conn, team_id, resource_id)?))
    }

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceOwnershipChecker;
    use crate::db::Database;
    use crate::models::{ActionItem, Board, Column, CreateActionItemRequest, Identity, Thought};
    use crate::services::{
        ActionItemService, BoardService, ColumnService, EventPublisher, TeamService, ThoughtService,
    };

    fn identity(user_id: &str) -> Identity {
        Identity {
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn member_of_one_team_is_never_authorized_on_another() {
        let db = Database::open_in_memory().unwrap();
        let events = EventPublisher::new(16);
        let teams = TeamService::new(db.clone());
        let alpha = teams.create_team("Alpha", "alice").unwrap();
        let beta = teams.create_team("Beta", "bob").unwrap();

        let beta_column = ColumnService::new(db.clone(), events.clone())
            .get_columns(&beta.id)
            .unwrap()[0]
            .id;
        let beta_thought = ThoughtService::new(db.clone(), events.clone())
            .create_thought(&beta.id, "beta only", beta_column)
            .unwrap();
        let action_items = ActionItemService::new(db.clone(), events.clone());
        let beta_item = action_items
            .create_action_item(
                &beta.id,
                &CreateActionItemRequest { task: "beta task".into(), ..Default::default() },
            )
            .unwrap();
        let beta_board = BoardService::new(db.clone(), events, action_items)
            .create_board(&beta.id, None)
            .unwrap();

        let alice = identity("alice");
        let bob = identity("bob");

        let thoughts = ResourceOwnershipChecker::<Thought>::new(db.clone());
        assert!(thoughts.request_is_authorized(&bob, &beta.id, beta_thought.id).unwrap());
        assert!(!thoughts.request_is_authorized(&alice, &beta.id, beta_thought.id).unwrap());
        assert!(!thoughts.request_is_authorized(&alice, &alpha.id, beta_thought.id).unwrap());

        let columns = ResourceOwnershipChecker::<Column>::new(db.clone());
        assert!(!columns.request_is_authorized(&alice, &alpha.id, beta_column).unwrap());

        let items = ResourceOwnershipChecker::<ActionItem>::new(db.clone());
        assert!(!items.request_is_authorized(&alice, &alpha.id, beta_item.id).unwrap());
        assert!(items.request_is_authorized(&bob, &beta.id, beta_item.id).unwrap());

        let boards = ResourceOwnershipChecker::<Board>::new(db);
        assert!(!boards.request_is_authorized(&alice, &alpha.id, beta_board.id).unwrap());
        assert!(boards.request_is_authorized(&bob, &beta.id, beta_board.id).unwrap());
    }
}
