pub mod documents;
pub mod health;
pub mod pages;

use actix_web::web;
use std::io;

use crate::documents::DocumentError;

/// Run filesystem work on the blocking pool so async workers stay free
pub async fn run_blocking<T, F>(f: F) -> Result<T, DocumentError>
where
    F: FnOnce() -> Result<T, DocumentError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| DocumentError::Io(io::Error::other(e.to_string())))?
}
