//! Filtering and grouping of the document list for the listing page.

use kb_types::{DocType, DocumentMeta};

/// Label for projects without a category
pub const UNCATEGORIZED: &str = "Other";

/// Which slice of the list is shown when no search is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Type(DocType),
}

impl Tab {
    /// Parse a `tab` query value; unknown values fall back to `All`
    pub fn parse(value: Option<&str>) -> Tab {
        value
            .and_then(DocType::from_str)
            .map(Tab::Type)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Type(t) => t.as_str(),
        }
    }
}

/// Case-insensitive substring match on title, summary, or any tag
pub fn matches_query(doc: &DocumentMeta, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    doc.title.to_lowercase().contains(&needle)
        || doc
            .summary
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&needle))
        || doc
            .tags
            .iter()
            .flatten()
            .any(|t| t.to_lowercase().contains(&needle))
}

/// Apply the search query or, when it is blank, the tab filter
pub fn filter_documents<'a>(
    docs: &'a [DocumentMeta],
    tab: Tab,
    query: Option<&str>,
) -> Vec<&'a DocumentMeta> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        // An active search spans every type
        Some(q) => docs.iter().filter(|d| matches_query(d, q)).collect(),
        None => docs
            .iter()
            .filter(|d| match tab {
                Tab::All => true,
                Tab::Type(t) => d.doc_type == t,
            })
            .collect(),
    }
}

#[derive(Debug)]
pub struct CategoryGroup<'a> {
    /// `None` for types that are not grouped by category
    pub label: Option<String>,
    pub docs: Vec<&'a DocumentMeta>,
}

#[derive(Debug)]
pub struct TypeGroup<'a> {
    pub doc_type: DocType,
    pub categories: Vec<CategoryGroup<'a>>,
}

impl TypeGroup<'_> {
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.docs.len()).sum()
    }
}

/// Group documents by type (fixed order), and projects by category.
///
/// Categories keep the order in which they first appear in `docs`; the
/// uncategorized group comes last. Empty types are omitted.
pub fn group_documents<'a>(docs: &[&'a DocumentMeta]) -> Vec<TypeGroup<'a>> {
    DocType::ALL
        .into_iter()
        .filter_map(|doc_type| {
            let of_type: Vec<&'a DocumentMeta> = docs
                .iter()
                .copied()
                .filter(|d| d.doc_type == doc_type)
                .collect();

            if of_type.is_empty() {
                return None;
            }

            let categories = if doc_type == DocType::Project {
                group_by_category(of_type)
            } else {
                vec![CategoryGroup {
                    label: None,
                    docs: of_type,
                }]
            };

            Some(TypeGroup {
                doc_type,
                categories,
            })
        })
        .collect()
}

fn group_by_category(docs: Vec<&DocumentMeta>) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut uncategorized = Vec::new();

    for doc in docs {
        let Some(category) = doc.category.as_deref() else {
            uncategorized.push(doc);
            continue;
        };

        match groups
            .iter_mut()
            .find(|g| g.label.as_deref() == Some(category))
        {
            Some(group) => group.docs.push(doc),
            None => groups.push(CategoryGroup {
                label: Some(category.to_string()),
                docs: vec![doc],
            }),
        }
    }

    if !uncategorized.is_empty() {
        groups.push(CategoryGroup {
            label: Some(UNCATEGORIZED.to_string()),
            docs: uncategorized,
        });
    }

    groups
}
