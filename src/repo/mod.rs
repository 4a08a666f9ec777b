//! Team-scoped data access over the SQLite store.
//!
//! # Responsibility
//! - Keep SQL inside the persistence boundary.
//! - Expose lookups keyed by `(team_id, id)` for every sub-resource.
//!
//! # Invariants
//! - Sub-resource reads and writes always filter on `team_id`.
//! - Repositories borrow a `Connection`, so they run equally well inside a
//!   `Transaction`.

pub mod action_item_repo;
pub mod board_repo;
pub mod column_repo;
pub mod invite_repo;
pub mod membership_repo;
pub mod team_repo;
pub mod thought_repo;
pub mod user_repo;

pub use action_item_repo::ActionItemRepository;
pub use board_repo::{BoardRecord, BoardRepository};
pub use column_repo::ColumnRepository;
pub use invite_repo::InviteRepository;
pub use membership_repo::MembershipRepository;
pub use team_repo::TeamRepository;
pub use thought_repo::ThoughtRepository;
pub use user_repo::UserRepository;
