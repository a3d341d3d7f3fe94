//! Parse YAML-style frontmatter at the top of a markdown document.
//!
//! Hand-rolled (no serde_yaml): only flat `key: value` pairs plus inline or
//! block lists for `tags`. Anything else is ignored rather than rejected.

/// Fields recognized in a frontmatter block. Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// A markdown document split into frontmatter and body
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Parse a complete markdown file (frontmatter + body)
pub fn parse_document(content: &str) -> ParsedDocument {
    match split_frontmatter(content) {
        Some((yaml, body)) => ParsedDocument {
            frontmatter: parse_frontmatter(yaml),
            body: body.to_string(),
        },
        None => ParsedDocument {
            frontmatter: Frontmatter::default(),
            body: content.to_string(),
        },
    }
}

/// Split content into (frontmatter_yaml, body).
///
/// The block must open with a `---` line and close with another `---` line;
/// an unterminated block means there is no frontmatter at all.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let after_open = trimmed.strip_prefix("---")?;
    let rest = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Parse the frontmatter block into known fields
fn parse_frontmatter(yaml: &str) -> Frontmatter {
    let mut fm = Frontmatter::default();
    // Set while reading `- item` lines under a bare `tags:` key
    let mut in_tag_list = false;

    for line in yaml.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if in_tag_list {
            if let Some(item) = trimmed.strip_prefix('-') {
                let item = unquote(item);
                if !item.is_empty() {
                    fm.tags.get_or_insert_with(Vec::new).push(item);
                }
                continue;
            }
            in_tag_list = false;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };

        let value = value.trim();
        match key.trim() {
            "title" => fm.title = non_empty(unquote(value)),
            "date" => fm.date = non_empty(unquote(value)),
            "summary" => fm.summary = non_empty(unquote(value)),
            "tags" => {
                if value.is_empty() {
                    in_tag_list = true;
                } else {
                    let tags = parse_inline_list(value);
                    fm.tags = if tags.is_empty() { None } else { Some(tags) };
                }
            }
            _ => {}
        }
    }

    fm
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Remove surrounding quotes from a string
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Parse an inline YAML list like [foo, bar, "baz qux"], or a bare `foo, bar`
fn parse_inline_list(s: &str) -> Vec<String> {
    let s = s.trim();
    let inner = if s.starts_with('[') && s.ends_with(']') {
        &s[1..s.len() - 1]
    } else {
        s
    };

    inner
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}
