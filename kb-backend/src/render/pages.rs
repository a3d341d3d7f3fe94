//! Server-rendered HTML pages: the listing and the single-document view.

use kb_types::{DocType, Document, DocumentMeta};

use super::listing::{self, Tab};
use super::markdown::{escape_html, render_markdown};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
a { color: #2457a7; text-decoration: none; }
a:hover { text-decoration: underline; }
nav.tabs a { margin-right: 1rem; }
nav.tabs a.active { font-weight: bold; }
form.search input { width: 100%; padding: .5rem; margin: 1rem 0; font-size: 1rem; }
ul.docs { list-style: none; padding: 0; }
ul.docs li { margin: .6rem 0; }
.meta { color: #666; font-size: .85rem; }
.tag { background: #eef; border-radius: 3px; padding: 0 .3rem; margin-right: .3rem; }
pre { background: #f5f5f5; padding: .8rem; overflow-x: auto; }
blockquote { border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #555; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn type_heading(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::Project => "Projects",
        DocType::Journal => "Journals",
        DocType::Concept => "Concepts",
    }
}

/// Link target for a document id. Slashes stay literal; the route accepts them.
pub fn doc_href(id: &str) -> String {
    let encoded: Vec<String> = id
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/doc/{}", encoded.join("/"))
}

fn meta_line(doc: &DocumentMeta) -> String {
    let mut parts = Vec::new();
    if let Some(date) = &doc.date {
        parts.push(escape_html(date));
    }
    if let Some(category) = &doc.category {
        parts.push(escape_html(category));
    }
    if let Some(tags) = &doc.tags {
        let tags: Vec<String> = tags
            .iter()
            .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
            .collect();
        parts.push(tags.join(""));
    }
    parts.join(" · ")
}

fn render_entry(doc: &DocumentMeta) -> String {
    let summary = doc
        .summary
        .as_deref()
        .map(|s| format!("<div>{}</div>", escape_html(s)))
        .unwrap_or_default();

    format!(
        "<li><a href=\"{}\">{}</a> <div class=\"meta\">{}</div>{}</li>\n",
        escape_html(&doc_href(&doc.id)),
        escape_html(&doc.title),
        meta_line(doc),
        summary
    )
}

/// Listing page: tabs, search box, and the grouped (or searched) documents
pub fn render_list_page(docs: &[DocumentMeta], tab: Tab, query: Option<&str>) -> String {
    let query_text = query.unwrap_or("").trim();
    let mut body = String::from("<h1>Knowledge Base</h1>\n<nav class=\"tabs\">\n");

    let tabs = std::iter::once(Tab::All).chain(DocType::ALL.into_iter().map(Tab::Type));
    for t in tabs {
        let label = match t {
            Tab::All => "All",
            Tab::Type(doc_type) => type_heading(doc_type),
        };
        let class = if t == tab && query_text.is_empty() { " class=\"active\"" } else { "" };
        body.push_str(&format!("<a href=\"/?tab={}\"{}>{}</a>\n", t.as_str(), class, label));
    }
    body.push_str("</nav>\n");

    body.push_str(&format!(
        "<form class=\"search\" method=\"get\" action=\"/\">\
         <input type=\"hidden\" name=\"tab\" value=\"{}\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search titles, summaries, tags\" value=\"{}\">\
         </form>\n",
        tab.as_str(),
        escape_html(query_text)
    ));

    let filtered = listing::filter_documents(docs, tab, query);

    if filtered.is_empty() {
        body.push_str("<p class=\"meta\">No documents found.</p>\n");
        return layout("Knowledge Base", &body);
    }

    if !query_text.is_empty() {
        // Search results are shown as one flat list
        body.push_str(&format!(
            "<h2>{} result(s) for “{}”</h2>\n<ul class=\"docs\">\n",
            filtered.len(),
            escape_html(query_text)
        ));
        for doc in &filtered {
            body.push_str(&render_entry(doc));
        }
        body.push_str("</ul>\n");
        return layout("Knowledge Base", &body);
    }

    for group in listing::group_documents(&filtered) {
        body.push_str(&format!(
            "<section>\n<h2>{} ({})</h2>\n",
            type_heading(group.doc_type),
            group.len()
        ));
        for category in &group.categories {
            if let Some(label) = &category.label {
                body.push_str(&format!("<h3>{}</h3>\n", escape_html(label)));
            }
            body.push_str("<ul class=\"docs\">\n");
            for doc in &category.docs {
                body.push_str(&render_entry(doc));
            }
            body.push_str("</ul>\n");
        }
        body.push_str("</section>\n");
    }

    layout("Knowledge Base", &body)
}

/// Single document page with rendered markdown body
pub fn render_document_page(doc: &Document) -> String {
    let mut body = String::from("<p><a href=\"/\">← All documents</a></p>\n<article>\n");

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&doc.meta.title)));
    body.push_str(&format!(
        "<div class=\"meta\">{} {}</div>\n",
        escape_html(doc.meta.doc_type.as_str()),
        meta_line(&doc.meta)
    ));

    if let Some(summary) = &doc.meta.summary {
        body.push_str(&format!("<p><em>{}</em></p>\n", escape_html(summary)));
    }

    if let Some(sections) = doc.sections.as_ref().filter(|s| !s.is_empty()) {
        body.push_str("<h4>Sections</h4>\n<ul>\n");
        for section in sections {
            body.push_str(&format!("<li>{}</li>\n", escape_html(section)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(&render_markdown(&doc.content));
    body.push_str("</article>\n");

    layout(&doc.meta.title, &body)
}

/// Shown when an id resolves to nothing
pub fn render_not_found_page(id: &str) -> String {
    let body = format!(
        "<h1>Document not found</h1>\n<p>No document with id <code>{}</code>.</p>\n\
         <p><a href=\"/\">← Back to all documents</a></p>\n",
        escape_html(id)
    );
    layout("Document not found", &body)
}

pub fn render_error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p>{}</p>\n<p><a href=\"/\">← Back to all documents</a></p>\n",
        escape_html(message)
    );
    layout("Error", &body)
}
