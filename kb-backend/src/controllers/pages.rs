//! HTML pages for browsing the knowledge base.

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::AppState;
use crate::controllers::run_blocking;
use crate::documents::{self, DocumentError};
use crate::render::listing::Tab;
use crate::render::pages;

const HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Deserialize)]
struct ListPageQuery {
    tab: Option<String>,
    q: Option<String>,
}

async fn list_page(data: web::Data<AppState>, query: web::Query<ListPageQuery>) -> impl Responder {
    let root = data.config.root.clone();
    let tab = Tab::parse(query.tab.as_deref());

    match run_blocking(move || documents::index_documents(&root)).await {
        Ok(docs) => HttpResponse::Ok()
            .content_type(HTML)
            .body(pages::render_list_page(&docs, tab, query.q.as_deref())),
        Err(e) => {
            log::error!("[Pages] Failed to list documents: {}", e);
            HttpResponse::InternalServerError()
                .content_type(HTML)
                .body(pages::render_error_page("The document list could not be loaded."))
        }
    }
}

async fn document_page(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let root = data.config.root.clone();
    let lookup_id = id.clone();

    match run_blocking(move || documents::load_document(&root, &lookup_id)).await {
        Ok(doc) => HttpResponse::Ok()
            .content_type(HTML)
            .body(pages::render_document_page(&doc)),
        Err(DocumentError::NotFound(_)) => HttpResponse::NotFound()
            .content_type(HTML)
            .body(pages::render_not_found_page(&id)),
        Err(e) => {
            log::error!("[Pages] Failed to load document {}: {}", id, e);
            HttpResponse::InternalServerError()
                .content_type(HTML)
                .body(pages::render_error_page("The document could not be loaded."))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list_page))
        .route("/doc/{id:.*}", web::get().to(document_page));
}
