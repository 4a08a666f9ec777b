// src/routes/mod.rs
pub mod action_item_routes;
pub mod auth_routes;
pub mod board_routes;
pub mod column_routes;
pub mod event_routes;
pub mod invitation_routes;
pub mod team_routes;
pub mod thought_routes;

use actix_web::web;

// Every route that requires a verified identity, mounted under /api
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    auth_routes::init_routes(cfg);
    team_routes::init_routes(cfg);
    invitation_routes::init_routes(cfg);
    thought_routes::init_routes(cfg);
    column_routes::init_routes(cfg);
    action_item_routes::init_routes(cfg);
    board_routes::init_routes(cfg);
    event_routes::init_routes(cfg);
}
