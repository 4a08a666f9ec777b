// src/state.rs
use crate::authorization::MembershipChecker;
use crate::config::AppConfig;
use crate::db::Database;
use crate::services::{
    ActionItemService, BoardService, ColumnService, EventPublisher, InviteService, TeamService,
    ThoughtService, UserService,
};
use crate::utils::jwt::JwtKeys;

/// Everything a handler needs, shared across workers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub events: EventPublisher,
    pub jwt: JwtKeys,
    pub membership: MembershipChecker,
    pub users: UserService,
    pub teams: TeamService,
    pub invites: InviteService,
    pub thoughts: ThoughtService,
    pub columns: ColumnService,
    pub action_items: ActionItemService,
    pub boards: BoardService,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        let events = EventPublisher::new(config.event_buffer);
        let action_items = ActionItemService::new(db.clone(), events.clone());
        Self {
            jwt: JwtKeys::new(&config.jwt_secret, config.token_ttl_hours),
            membership: MembershipChecker::new(db.clone()),
            users: UserService::new(db.clone(), config.bcrypt_cost),
            teams: TeamService::new(db.clone()),
            invites: InviteService::new(db.clone()),
            thoughts: ThoughtService::new(db.clone(), events.clone()),
            columns: ColumnService::new(db.clone(), events.clone()),
            boards: BoardService::new(db.clone(), events.clone(), action_items.clone()),
            action_items,
            events,
            db,
        }
    }
}
