use actix_web::{web, HttpResponse, Responder};
use kb_types::DocType;

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/health/config").route(web::get().to(get_config_status)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs()
    }))
}

async fn get_config_status(state: web::Data<AppState>) -> impl Responder {
    let root = &state.config.root;
    let folders: Vec<&str> = DocType::ALL
        .iter()
        .map(|t| t.folder())
        .filter(|folder| root.join(folder).is_dir())
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "root": root.to_string_lossy(),
        "root_exists": root.is_dir(),
        "type_folders": folders
    }))
}
