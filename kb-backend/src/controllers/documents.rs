//! Documents REST API — read-only.
//!
//! `GET /api/documents` lists every document; `GET /api/documents/{id}` returns
//! one, where the id may contain slashes.

use actix_web::{web, HttpResponse, Responder};

use crate::AppState;
use crate::controllers::run_blocking;
use crate::documents::{self, DocumentError};

/// List all documents, freshly indexed
async fn list_documents(data: web::Data<AppState>) -> impl Responder {
    let root = data.config.root.clone();

    match run_blocking(move || documents::index_documents(&root)).await {
        Ok(docs) => HttpResponse::Ok().json(docs),
        Err(e) => {
            log::error!("[API] Failed to list documents: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to list documents: {}", e)
            }))
        }
    }
}

/// Get one document by id
async fn get_document(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let root = data.config.root.clone();
    let lookup_id = id.clone();

    match run_blocking(move || documents::load_document(&root, &lookup_id)).await {
        Ok(doc) => HttpResponse::Ok().json(doc),
        Err(DocumentError::NotFound(_)) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Document not found",
            "id": id
        })),
        Err(e) => {
            log::error!("[API] Failed to load document {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to load document: {}", e)
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/documents")
            .route("", web::get().to(list_documents))
            .route("/{id:.*}", web::get().to(get_document)),
    );
}
