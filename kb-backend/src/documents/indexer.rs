//! Tree walker: classifies every entry under the type folders and emits one
//! `DocumentMeta` per document.
//!
//! Shapes under a type folder:
//! - `name/` with `body.md` or `index.md`: a document folder
//! - `name/` without one: a category folder whose children (folders or `.md`
//!   files) are subdocuments
//! - `name.md`: a flat file, dated by its file name unless frontmatter says otherwise
//!
//! A failure on one entry is logged and skips that entry only.

use kb_types::{DocType, DocumentMeta};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::DocumentError;
use super::file_ops::{self, Entry};
use super::meta;

/// Walk `root` and return every document, sorted for display.
///
/// A missing root yields an empty list. Missing type folders are skipped.
pub fn index_documents(root: &Path) -> Result<Vec<DocumentMeta>, DocumentError> {
    match fs::metadata(root) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => {
            return Err(DocumentError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            )));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("[Indexer] Root {} does not exist", root.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    }

    let mut docs = Vec::new();

    for doc_type in DocType::ALL {
        let type_dir = root.join(doc_type.folder());
        if !type_dir.is_dir() {
            log::debug!("[Indexer] No {} folder, skipping", doc_type.folder());
            continue;
        }

        let entries = match file_ops::list_entries(&type_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("[Indexer] Cannot read {}: {}", type_dir.display(), e);
                continue;
            }
        };

        for entry in entries {
            if let Err(e) = index_entry(doc_type, &entry, &mut docs) {
                log::warn!("[Indexer] Skipping {}: {}", entry.path.display(), e);
            }
        }
    }

    drop_duplicate_ids(&mut docs);
    sort_documents(&mut docs);
    log::debug!("[Indexer] Indexed {} documents under {}", docs.len(), root.display());
    Ok(docs)
}

/// Classify one entry directly under a type folder
fn index_entry(doc_type: DocType, entry: &Entry, docs: &mut Vec<DocumentMeta>) -> io::Result<()> {
    let folder = doc_type.folder();

    if entry.is_dir {
        if file_ops::primary_body_file(&entry.path).is_some() {
            let id = format!("{}/{}", folder, entry.name);
            // A project folder is its own category
            let category = (doc_type == DocType::Project).then(|| entry.name.clone());
            let resolved = meta::resolve_folder(&entry.path)?;
            docs.push(resolved.meta.into_document_meta(id, doc_type, category));
        } else {
            index_category(doc_type, entry, docs)?;
        }
    } else if entry.is_markdown() {
        let id = format!("{}/{}", folder, entry.stem());
        let mut resolved = meta::resolve_file(&entry.path)?;
        if resolved.meta.date.is_none() {
            resolved.meta.date = Some(entry.stem().to_string());
        }
        docs.push(resolved.meta.into_document_meta(id, doc_type, None));
    }

    Ok(())
}

/// Emit the subdocuments of a category folder
fn index_category(doc_type: DocType, category: &Entry, docs: &mut Vec<DocumentMeta>) -> io::Result<()> {
    for child in file_ops::list_entries(&category.path)? {
        let resolved = if child.is_dir {
            meta::resolve_folder(&child.path)
        } else if child.is_markdown() {
            meta::resolve_file(&child.path)
        } else {
            continue;
        };

        let resolved = match resolved {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[Indexer] Skipping {}: {}", child.path.display(), e);
                continue;
            }
        };

        let id = format!("{}/{}/{}", doc_type.folder(), category.name, child.stem());
        docs.push(resolved.meta.into_document_meta(id, doc_type, Some(category.name.clone())));
    }

    Ok(())
}

/// Keep the first record for each id.
///
/// Entries are walked in name order, so a folder `bar/` is always seen before
/// a file `bar.md`; the folder is also what the loader resolves `bar` to.
fn drop_duplicate_ids(docs: &mut Vec<DocumentMeta>) {
    let mut seen = HashSet::new();
    docs.retain(|doc| {
        if seen.insert(doc.id.clone()) {
            return true;
        }
        log::warn!("[Indexer] Duplicate id {}, keeping the folder", doc.id);
        false
    });
}

/// Dated documents first, newest first; undated ones after, by title
pub fn sort_documents(docs: &mut [DocumentMeta]) {
    docs.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(da), Some(db)) => db.cmp(da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn find<'a>(docs: &'a [DocumentMeta], id: &str) -> &'a DocumentMeta {
        docs.iter()
            .find(|d| d.id == id)
            .unwrap_or_else(|| panic!("missing {}", id))
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let docs = index_documents(&dir.path().join("nope")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_root_that_is_a_file_errors() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(matches!(index_documents(&file), Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_project_folders_and_categories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "projects/foo/body.md", "Foo body");
        write(root, "projects/group/bar/body.md", "---\ntitle: Bar\n---\n");
        write(root, "projects/group/notes.md", "---\ndate: 2024-03-01\n---\n");
        write(root, "projects/group/image.png", "");

        let docs = index_documents(root).unwrap();
        assert_eq!(docs.len(), 3);

        let foo = find(&docs, "projects/foo");
        assert_eq!(foo.doc_type, DocType::Project);
        assert_eq!(foo.category.as_deref(), Some("foo"));
        assert_eq!(foo.title, "foo");

        let bar = find(&docs, "projects/group/bar");
        assert_eq!(bar.category.as_deref(), Some("group"));
        assert_eq!(bar.title, "Bar");

        let notes = find(&docs, "projects/group/notes");
        assert_eq!(notes.category.as_deref(), Some("group"));
        assert_eq!(notes.date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_nested_project_folder() {
        let dir = tempdir().unwrap();
        write(dir.path(), "projects/foo/bar/body.md", "Nested");

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "projects/foo/bar");
        assert_eq!(docs[0].category.as_deref(), Some("foo"));
    }

    #[test]
    fn test_non_project_folder_has_no_category() {
        let dir = tempdir().unwrap();
        write(dir.path(), "concepts/ownership/index.md", "---\ntitle: Ownership\n---\n");

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs[0].id, "concepts/ownership");
        assert_eq!(docs[0].doc_type, DocType::Concept);
        assert_eq!(docs[0].category, None);
    }

    #[test]
    fn test_flat_file_date_defaults_to_filename() {
        let dir = tempdir().unwrap();
        write(dir.path(), "journals/2026-01-28.md", "Today I wrote code.");
        write(dir.path(), "journals/2026-01-29.md", "---\ndate: 2026-02-01\n---\n");

        let docs = index_documents(dir.path()).unwrap();
        let first = find(&docs, "journals/2026-01-28");
        assert_eq!(first.date.as_deref(), Some("2026-01-28"));
        assert_eq!(first.category, None);

        let second = find(&docs, "journals/2026-01-29");
        assert_eq!(second.date.as_deref(), Some("2026-02-01"));
    }

    #[test]
    fn test_subdocument_file_ignores_category_sidecar() {
        let dir = tempdir().unwrap();
        write(dir.path(), "concepts/lang/meta.json", r#"{"title": "Category meta"}"#);
        write(dir.path(), "concepts/lang/rust.md", "No frontmatter");

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "concepts/lang/rust");
        assert_eq!(docs[0].title, "rust");
        assert_eq!(docs[0].date, None);
    }

    #[test]
    fn test_other_top_level_entries_ignored() {
        let dir = tempdir().unwrap();
        write(dir.path(), "archive/old.md", "old");
        write(dir.path(), "README.md", "readme");
        write(dir.path(), ".hidden/x.md", "x");
        write(dir.path(), "journals/.draft.md", "draft");

        let docs = index_documents(dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_malformed_sidecar_does_not_fail_listing() {
        let dir = tempdir().unwrap();
        write(dir.path(), "projects/broken/body.md", "Body");
        write(dir.path(), "projects/broken/meta.json", "{ nope");
        write(dir.path(), "projects/fine/body.md", "Body");
        write(dir.path(), "projects/fine/meta.json", r#"{"summary": "ok"}"#);

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);

        let broken = find(&docs, "projects/broken");
        assert_eq!(broken.title, "broken");
        assert_eq!(broken.summary, None);
        assert_eq!(find(&docs, "projects/fine").summary.as_deref(), Some("ok"));
    }

    #[test]
    fn test_folder_wins_over_file_with_same_id() {
        let dir = tempdir().unwrap();
        write(dir.path(), "projects/group/bar/body.md", "---\ntitle: Folder\n---\n");
        write(dir.path(), "projects/group/bar.md", "---\ntitle: File\n---\n");
        write(dir.path(), "journals/x/index.md", "---\ntitle: Folder\n---\n");
        write(dir.path(), "journals/x.md", "---\ntitle: File\n---\n");

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(find(&docs, "projects/group/bar").title, "Folder");
        assert_eq!(find(&docs, "journals/x").title, "Folder");
    }

    #[test]
    fn test_subdocument_folder_with_md_suffix_keeps_name() {
        let dir = tempdir().unwrap();
        write(dir.path(), "projects/group/v1.md/body.md", "Versioned");

        let docs = index_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "projects/group/v1.md");
    }

    #[test]
    fn test_sort_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "concepts/b.md", "---\ndate: 2024-01-01\n---\n");
        write(dir.path(), "concepts/a.md", "---\ndate: 2024-06-01\n---\n");
        write(dir.path(), "concepts/c/body.md", "undated");

        let docs = index_documents(dir.path()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["concepts/a", "concepts/b", "concepts/c"]);
    }

    #[test]
    fn test_undated_sorted_by_title_case_sensitive() {
        let mut docs: Vec<DocumentMeta> = ["beta", "Zeta", "alpha"]
            .iter()
            .map(|t| DocumentMeta {
                id: format!("concepts/{}", t),
                title: t.to_string(),
                doc_type: DocType::Concept,
                category: None,
                date: None,
                tags: None,
                summary: None,
            })
            .collect();

        sort_documents(&mut docs);
        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "alpha", "beta"]);
    }
}
