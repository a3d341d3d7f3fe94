use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::time::Instant;

mod config;
mod controllers;
mod documents;
mod render;

use config::Config;

pub struct AppState {
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Knowledge base v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Serving documents from {}", config.root.display());
    if !config.root.is_dir() {
        log::warn!(
            "Root {} is not a directory yet; listings will be empty until it exists (set {} to change it)",
            config.root.display(),
            config::env_vars::KB_ROOT
        );
    }

    let bind_addr = config.bind_addr();
    let state = web::Data::new(AppState::new(config));

    log::info!("Listening on http://{}", bind_addr);

    HttpServer::new(move || {
        // Read-only API, so any origin may call it
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::documents::config)
            .configure(controllers::pages::config)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
