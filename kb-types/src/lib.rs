//! Shared types for the knowledge-base backend and its API clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Document Types
// =====================================================

/// Kind of document, derived from the top-level folder it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Project,
    Journal,
    Concept,
}

impl DocType {
    /// All types, in display order
    pub const ALL: [DocType; 3] = [DocType::Project, DocType::Journal, DocType::Concept];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Project => "project",
            DocType::Journal => "journal",
            DocType::Concept => "concept",
        }
    }

    /// Name of the top-level folder holding documents of this type
    pub fn folder(&self) -> &'static str {
        match self {
            DocType::Project => "projects",
            DocType::Journal => "journals",
            DocType::Concept => "concepts",
        }
    }

    pub fn from_folder(name: &str) -> Option<DocType> {
        match name {
            "projects" => Some(DocType::Project),
            "journals" => Some(DocType::Journal),
            "concepts" => Some(DocType::Concept),
            _ => None,
        }
    }

    pub fn from_str(s: &str) -> Option<DocType> {
        match s.to_lowercase().as_str() {
            "project" => Some(DocType::Project),
            "journal" => Some(DocType::Journal),
            "concept" => Some(DocType::Concept),
            _ => None,
        }
    }
}

/// List-view record for a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Path-derived identifier, e.g. `projects/foo/bar`
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form but expected to sort lexicographically (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A document with its full markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    /// Markdown source with frontmatter stripped
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_folder_mapping() {
        for t in DocType::ALL {
            assert_eq!(DocType::from_folder(t.folder()), Some(t));
            assert_eq!(DocType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(DocType::from_folder("project"), None);
        assert_eq!(DocType::from_str("Journal"), Some(DocType::Journal));
    }

    #[test]
    fn test_document_json_shape() {
        let doc = Document {
            meta: DocumentMeta {
                id: "projects/foo".to_string(),
                title: "Foo".to_string(),
                doc_type: DocType::Project,
                category: Some("foo".to_string()),
                date: None,
                tags: Some(vec!["rust".to_string()]),
                summary: None,
            },
            content: "# Foo".to_string(),
            sections: None,
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], "projects/foo");
        assert_eq!(value["type"], "project");
        assert_eq!(value["tags"][0], "rust");
        assert!(value.get("date").is_none());
        assert!(value.get("sections").is_none());

        let back: Document = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
