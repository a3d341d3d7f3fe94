//! Filesystem helpers for the knowledge-base tree
//!
//! Missing files are reported as `Ok(None)` / `Lookup::Absent`, never as errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Primary body file names, in lookup order
pub const BODY_FILES: [&str; 2] = ["body.md", "index.md"];
/// Sidecar metadata file inside a document folder
pub const META_FILE: &str = "meta.json";
/// Subdirectory listing a document's sections
pub const SECTIONS_DIR: &str = "sections";

/// Outcome of reading an optional artifact
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
    Malformed(String),
}

/// A directory entry that survived filtering
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn is_markdown(&self) -> bool {
        !self.is_dir && is_markdown(&self.path)
    }

    /// Name as it appears in a document id: files lose their `.md`
    /// extension, directories keep their full name
    pub fn stem(&self) -> &str {
        if self.is_dir {
            return &self.name;
        }
        self.name.strip_suffix(".md").unwrap_or(&self.name)
    }
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Read a file, returning `None` if it does not exist
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(raw) => Ok(Some(String::from_utf8_lossy(&raw).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Locate the primary body file of a document folder (`body.md`, then `index.md`)
pub fn primary_body_file(dir: &Path) -> Option<PathBuf> {
    BODY_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// List the visible entries of a directory, sorted by name.
///
/// Entries whose name is not valid UTF-8 or whose type cannot be read are
/// skipped with a warning.
pub fn list_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("[Walk] Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let name = match entry.file_name().to_str() {
            Some(n) => n.to_string(),
            None => {
                log::warn!("[Walk] Skipping non UTF-8 name in {}", dir.display());
                continue;
            }
        };

        if is_hidden(&name) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks, so linked folders behave like real ones
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[Walk] Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        entries.push(Entry {
            name,
            path,
            is_dir: metadata.is_dir(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Section identifiers from a document folder's `sections/` directory.
///
/// Returns `None` when there is no such directory. Order follows directory
/// enumeration.
pub fn list_sections(dir: &Path) -> Option<Vec<String>> {
    let sections_dir = dir.join(SECTIONS_DIR);
    if !sections_dir.is_dir() {
        return None;
    }

    let read_dir = match fs::read_dir(&sections_dir) {
        Ok(rd) => rd,
        Err(e) => {
            log::warn!("[Loader] Cannot read {}: {}", sections_dir.display(), e);
            return None;
        }
    };

    let sections = read_dir
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_str()?.to_string();
            if is_hidden(&name) || !is_markdown(&path) || path.is_dir() {
                return None;
            }
            name.strip_suffix(".md").map(|s| s.to_string())
        })
        .collect();

    Some(sections)
}
