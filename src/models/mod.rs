// src/models/mod.rs
pub mod action_item;
pub mod board;
pub mod column;
pub mod events;
pub mod invitations;
pub mod team;
pub mod thought;
pub mod user;

pub use action_item::*;
pub use board::*;
pub use column::*;
pub use events::*;
pub use invitations::*;
pub use team::*;
pub use thought::*;
pub use user::*;
