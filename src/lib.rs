pub mod authorization;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod repo;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use actix_web::web;
use state::AppState;
use utils::auth_middleware::Authentication;

/// Mounts the public auth routes and the authenticated `/api` surface.
///
/// `/api/auth` is registered first so the authenticated scope never shadows it.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let keys = state.jwt.clone();
        cfg.app_data(web::Data::new(state))
            .service(web::scope("/api/auth").configure(routes::auth_routes::init_public_routes))
            .service(
                web::scope("/api")
                    .wrap(Authentication::new(keys))
                    .configure(routes::init_routes),
            );
    }
}

#[cfg(test)]
mod tests;
