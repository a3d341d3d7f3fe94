//! Metadata resolution: sidecar `meta.json` + frontmatter, merged per field.
//!
//! Frontmatter wins whenever it has a non-empty value; the sidecar fills the
//! gaps. A malformed sidecar is logged and treated as empty.

use kb_types::{DocType, DocumentMeta};
use serde::Deserialize;
use std::io;
use std::path::Path;

use super::file_ops::{self, Lookup};
use super::frontmatter::{self, Frontmatter};

/// Typed view of a `meta.json` sidecar. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SidecarMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// Metadata after merging both sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// Merged metadata plus the markdown body it came with
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub meta: ResolvedMeta,
    pub body: String,
}

/// Read and validate the sidecar of a document folder
pub fn read_sidecar(dir: &Path) -> Lookup<SidecarMeta> {
    let path = dir.join(file_ops::META_FILE);
    match file_ops::read_optional(&path) {
        Ok(Some(raw)) => match serde_json::from_str::<SidecarMeta>(&raw) {
            Ok(meta) => Lookup::Found(meta),
            Err(e) => Lookup::Malformed(e.to_string()),
        },
        Ok(None) => Lookup::Absent,
        Err(e) => Lookup::Malformed(e.to_string()),
    }
}

/// Sidecar contents, or an empty record when absent or malformed
fn sidecar_or_default(dir: &Path) -> SidecarMeta {
    match read_sidecar(dir) {
        Lookup::Found(meta) => meta,
        Lookup::Absent => SidecarMeta::default(),
        Lookup::Malformed(reason) => {
            log::warn!(
                "[Meta] Ignoring malformed {}: {}",
                dir.join(file_ops::META_FILE).display(),
                reason
            );
            SidecarMeta::default()
        }
    }
}

/// Merge frontmatter over sidecar, field by field
pub fn merge(fm: &Frontmatter, sidecar: &SidecarMeta) -> ResolvedMeta {
    ResolvedMeta {
        title: pick(&fm.title, &sidecar.title),
        date: pick(&fm.date, &sidecar.date),
        tags: pick_tags(&fm.tags, &sidecar.tags),
        summary: pick(&fm.summary, &sidecar.summary),
    }
}

fn pick(primary: &Option<String>, fallback: &Option<String>) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn pick_tags(primary: &Option<Vec<String>>, fallback: &Option<Vec<String>>) -> Option<Vec<String>> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .find(|tags| !tags.is_empty())
        .cloned()
}

/// Resolve a folder-style document: primary body file (if any) + sidecar
pub fn resolve_folder(dir: &Path) -> io::Result<Resolved> {
    let parsed = match file_ops::primary_body_file(dir) {
        Some(path) => match file_ops::read_optional(&path)? {
            Some(content) => frontmatter::parse_document(&content),
            None => Default::default(),
        },
        None => Default::default(),
    };

    let sidecar = sidecar_or_default(dir);

    Ok(Resolved {
        meta: merge(&parsed.frontmatter, &sidecar),
        body: parsed.body,
    })
}

/// Resolve a single markdown file: frontmatter only, no sidecar
pub fn resolve_file(path: &Path) -> io::Result<Resolved> {
    let parsed = match file_ops::read_optional(path)? {
        Some(content) => frontmatter::parse_document(&content),
        None => Default::default(),
    };

    Ok(Resolved {
        meta: merge(&parsed.frontmatter, &SidecarMeta::default()),
        body: parsed.body,
    })
}

/// Title used when neither source provides one: last id segment, separators as spaces
pub fn fallback_title(id: &str) -> String {
    id.rsplit('/')
        .next()
        .unwrap_or(id)
        .replace(['-', '_'], " ")
}

impl ResolvedMeta {
    pub fn into_document_meta(
        self,
        id: String,
        doc_type: DocType,
        category: Option<String>,
    ) -> DocumentMeta {
        let title = self.title.unwrap_or_else(|| fallback_title(&id));
        DocumentMeta {
            id,
            title,
            doc_type,
            category,
            date: self.date,
            tags: self.tags,
            summary: self.summary,
        }
    }
}
