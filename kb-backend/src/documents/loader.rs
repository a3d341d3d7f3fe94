//! Resolve a document id back to its files and load the full document.

use kb_types::{DocType, Document};
use std::path::{Path, PathBuf};

use super::DocumentError;
use super::file_ops;
use super::meta;

/// Load the document identified by `id` (e.g. `projects/foo/bar`).
///
/// Tries `root/{id}` first, then `root/{id}.md`.
pub fn load_document(root: &Path, id: &str) -> Result<Document, DocumentError> {
    let not_found = || DocumentError::NotFound(id.to_string());

    let segments = parse_id(id).ok_or_else(not_found)?;
    let doc_type = DocType::from_folder(segments[0]).ok_or_else(not_found)?;

    let (path, is_dir) = resolve_path(root, &segments).ok_or_else(not_found)?;
    let id = segments.join("/");

    let (mut resolved, sections) = if is_dir {
        let resolved = meta::resolve_folder(&path)?;
        (resolved, file_ops::list_sections(&path))
    } else {
        (meta::resolve_file(&path)?, None)
    };

    // Project folders are their own category, matching the indexer
    let category = (segments.len() > 2 || (is_dir && doc_type == DocType::Project))
        .then(|| segments[1].to_string());

    // Two-segment files are flat files; their name doubles as a date
    if segments.len() == 2 && !is_dir && resolved.meta.date.is_none() {
        resolved.meta.date = Some(segments[1].to_string());
    }

    log::debug!("[Loader] Loaded {} from {}", id, path.display());

    Ok(Document {
        meta: resolved.meta.into_document_meta(id, doc_type, category),
        content: resolved.body,
        sections,
    })
}

/// Split an id into path segments, rejecting anything that could escape the root
fn parse_id(id: &str) -> Option<Vec<&str>> {
    let id = id.trim_end_matches('/');
    if id.is_empty() || id.starts_with('/') || id.contains('\\') {
        return None;
    }

    let segments: Vec<&str> = id.split('/').collect();
    let valid = segments
        .iter()
        .all(|s| !s.is_empty() && *s != "." && *s != "..");

    if valid && segments.len() >= 2 { Some(segments) } else { None }
}

/// Find the file or folder backing the id segments
fn resolve_path(root: &Path, segments: &[&str]) -> Option<(PathBuf, bool)> {
    let direct: PathBuf = segments.iter().fold(root.to_path_buf(), |p, s| p.join(s));

    let mut with_ext = direct.clone().into_os_string();
    with_ext.push(".md");
    let with_ext = PathBuf::from(with_ext);

    if direct.is_dir() {
        // A category folder is not a document; a flat file with its name is
        let is_category = segments.len() == 2 && file_ops::primary_body_file(&direct).is_none();
        if is_category && with_ext.is_file() {
            return Some((with_ext, false));
        }
        return Some((direct, true));
    }
    if direct.is_file() {
        return Some((direct, false));
    }
    if with_ext.is_file() {
        return Some((with_ext, false));
    }

    None
}
