// src/services/mod.rs
pub mod action_item_service;
pub mod board_service;
pub mod column_service;
pub mod event_publisher;
pub mod invite_service;
pub mod team_service;
pub mod thought_service;
pub mod user_service;

pub use action_item_service::ActionItemService;
pub use board_service::BoardService;
pub use column_service::ColumnService;
pub use event_publisher::EventPublisher;
pub use invite_service::InviteService;
pub use team_service::TeamService;
pub use thought_service::ThoughtService;
pub use user_service::UserService;
