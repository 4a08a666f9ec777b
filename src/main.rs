//Third-party-dependencies
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware::Logger, App, HttpServer};
use log::{error, info};
use retro_service::config::AppConfig;
use retro_service::configure_app;
use retro_service::db::Database;
use retro_service::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let db = Database::open(&config.database_path).map_err(|e| {
        error!("❌ Failed to open database at {}: {}", config.database_path, e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let state = AppState::new(db, &config);

    info!("🚀 Server started at {}", config.bind_address);

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .expose_headers(vec![header::LOCATION, header::AUTHORIZATION]),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .configure(configure_app(state.clone()))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
