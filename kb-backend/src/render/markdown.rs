//! Minimal markdown → HTML renderer for the document view.
//!
//! Not CommonMark: a line-oriented block pass (headers, fenced code, quotes,
//! flat lists, rules, paragraphs) followed by regex inline substitutions
//! (code spans, links, bold, italic). Lists never nest and tables are plain text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*?)(?:\s+#+)?\s*$").unwrap());
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$").unwrap());
static UL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static OL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").unwrap());
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>\s?(.*)$").unwrap());

static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+?)\*\*|__([^_]+?)__").unwrap());
static ITALIC_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*?)\*").unwrap());
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_]+?)_\b").unwrap());
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x00(\d+)\x00").unwrap());

enum Block {
    Paragraph(Vec<String>),
    Quote(Vec<String>),
    List { ordered: bool, items: Vec<String> },
    Code { lang: String, lines: Vec<String> },
}

/// Render markdown source to an HTML fragment
pub fn render_markdown(source: &str) -> String {
    let mut out = String::new();
    let mut current: Option<Block> = None;

    for line in source.lines() {
        if let Some(Block::Code { lines, .. }) = current.as_mut() {
            if line.trim_start().starts_with("```") {
                flush(&mut out, current.take());
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        let trimmed = line.trim();

        if let Some(fence) = trimmed.strip_prefix("```") {
            flush(&mut out, current.take());
            current = Some(Block::Code {
                lang: fence.trim().to_string(),
                lines: Vec::new(),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut out, current.take());
            continue;
        }

        if RULE_RE.is_match(line) {
            flush(&mut out, current.take());
            out.push_str("<hr>\n");
            continue;
        }

        if let Some(caps) = HEADER_RE.captures(trimmed) {
            flush(&mut out, current.take());
            let level = caps[1].len();
            out.push_str(&format!("<h{0}>{1}</h{0}>\n", level, render_inline(&caps[2])));
            continue;
        }

        if let Some(caps) = QUOTE_RE.captures(line) {
            let text = caps[1].to_string();
            match current.as_mut() {
                Some(Block::Quote(lines)) => lines.push(text),
                _ => {
                    flush(&mut out, current.take());
                    current = Some(Block::Quote(vec![text]));
                }
            }
            continue;
        }

        let list_item = UL_RE
            .captures(line)
            .map(|c| (false, c[1].to_string()))
            .or_else(|| OL_RE.captures(line).map(|c| (true, c[1].to_string())));

        if let Some((ordered, text)) = list_item {
            match current.as_mut() {
                Some(Block::List { ordered: o, items }) if *o == ordered => items.push(text),
                _ => {
                    flush(&mut out, current.take());
                    current = Some(Block::List {
                        ordered,
                        items: vec![text],
                    });
                }
            }
            continue;
        }

        match current.as_mut() {
            Some(Block::Paragraph(lines)) => lines.push(trimmed.to_string()),
            _ => {
                flush(&mut out, current.take());
                current = Some(Block::Paragraph(vec![trimmed.to_string()]));
            }
        }
    }

    // Unterminated fences still render as code
    flush(&mut out, current.take());
    out
}

fn flush(out: &mut String, block: Option<Block>) {
    let Some(block) = block else {
        return;
    };

    match block {
        Block::Paragraph(lines) => {
            let html: Vec<String> = lines.iter().map(|l| render_inline(l)).collect();
            out.push_str(&format!("<p>{}</p>\n", html.join("<br>\n")));
        }
        Block::Quote(lines) => {
            let html: Vec<String> = lines.iter().map(|l| render_inline(l)).collect();
            out.push_str(&format!("<blockquote><p>{}</p></blockquote>\n", html.join("<br>\n")));
        }
        Block::List { ordered, items } => {
            let tag = if ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{}>\n", tag));
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", render_inline(&item)));
            }
            out.push_str(&format!("</{}>\n", tag));
        }
        Block::Code { lang, lines } => {
            let class = if lang.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", escape_html(&lang))
            };
            out.push_str(&format!(
                "<pre><code{}>{}</code></pre>\n",
                class,
                escape_html(&lines.join("\n"))
            ));
        }
    }
}

/// Inline pass: code spans and finished links are set aside as placeholders
/// so emphasis never applies inside them
fn render_inline(text: &str) -> String {
    let mut spans: Vec<String> = Vec::new();
    let escaped = escape_html(text);

    let protected = CODE_SPAN_RE.replace_all(&escaped, |caps: &Captures| {
        spans.push(format!("<code>{}</code>", &caps[1]));
        format!("\x00{}\x00", spans.len() - 1)
    });

    let linked = LINK_RE.replace_all(&protected, |caps: &Captures| {
        let url = &caps[2];
        if !is_safe_url(url) {
            return caps[1].to_string();
        }
        let label = restore_spans(&emphasize(&caps[1]), &spans);
        spans.push(format!("<a href=\"{}\">{}</a>", url, label));
        format!("\x00{}\x00", spans.len() - 1)
    });

    restore_spans(&emphasize(&linked), &spans)
}

fn emphasize(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, |caps: &Captures| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or("");
        format!("<strong>{}</strong>", inner)
    });
    let italic = ITALIC_STAR_RE.replace_all(&bold, "<em>$1</em>");
    ITALIC_UNDERSCORE_RE
        .replace_all(&italic, "<em>$1</em>")
        .into_owned()
}

fn restore_spans(text: &str, spans: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| spans.get(i).cloned())
                .unwrap_or_default()
        })
        .into_owned()
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:"))
}

/// Escape text for safe inclusion in HTML content and attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_and_paragraphs() {
        let html = render_markdown("# Title\n\nFirst line\nsecond line\n\n### Sub ###");
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>First line<br>\nsecond line</p>\n<h3>Sub</h3>\n"
        );
    }

    #[test]
    fn test_inline_emphasis_and_links() {
        let html = render_markdown("Some **bold**, *italic*, __strong__ and _em_ with [a link](https://example.com).");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<a href=\"https://example.com\">a link</a>"));
    }

    #[test]
    fn test_snake_case_is_not_italic() {
        let html = render_markdown("call some_function_name now");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_code_span_is_protected() {
        let html = render_markdown("Use `**not bold**` here");
        assert!(html.contains("<code>**not bold**</code>"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_fenced_code_block_escapes() {
        let html = render_markdown("```rust\nfn main() { let x = 1 < 2; }\n# not a header\n```\nafter");
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() { let x = 1 &lt; 2; }\n# not a header</code></pre>"));
        assert!(html.contains("<p>after</p>"));
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn test_lists_are_flat() {
        let html = render_markdown("- one\n- two\n  - nested\n\n1. first\n2. second");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li>two</li>\n<li>nested</li>\n</ul>\n<ol>\n<li>first</li>\n<li>second</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_blockquote_and_rules() {
        let html = render_markdown("> quoted\n> more\n\n---\n\n* * *");
        assert_eq!(
            html,
            "<blockquote><p>quoted<br>\nmore</p></blockquote>\n<hr>\n<hr>\n"
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert('x')</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_emphasis_does_not_touch_link_urls() {
        let html = render_markdown("[init](https://docs.python.org/3/__init__.html) and [x](https://e.com/a*b*c)");
        assert!(html.contains("<a href=\"https://docs.python.org/3/__init__.html\">init</a>"));
        assert!(html.contains("<a href=\"https://e.com/a*b*c\">x</a>"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_link_label_keeps_emphasis_and_code() {
        let html = render_markdown("[**bold** `code`](https://example.com)");
        assert!(html.contains("<a href=\"https://example.com\"><strong>bold</strong> <code>code</code></a>"));
    }

    #[test]
    fn test_javascript_links_are_dropped() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("<a "));
    }
}
