// ABOUTME: HTML-to-plain-text conversion for item descriptions.
// ABOUTME: Parses with scraper so entities decode correctly; block elements become line breaks.

use ego_tree::iter::Edge;
use scraper::{Html, Node};

/// Elements that start a new line when rendered as plain text.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

/// Elements whose text is never shown.
const HIDDEN_TAGS: &[&str] = &["script", "style", "template"];

/// Converts an HTML fragment to readable plain text.
///
/// Block boundaries become single line breaks, runs of whitespace inside a line
/// collapse to one space, and blank lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    let mut hidden_depth = 0usize;

    for edge in fragment.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                Node::Element(el) if HIDDEN_TAGS.contains(&el.name()) => hidden_depth += 1,
                Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => raw.push('\n'),
                _ => {}
            },
            Edge::Close(node) => match node.value() {
                Node::Element(el) if HIDDEN_TAGS.contains(&el.name()) => {
                    hidden_depth = hidden_depth.saturating_sub(1)
                }
                Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => raw.push('\n'),
                _ => {}
            },
        }
    }

    raw.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("just words"), "just words");
    }

    #[test]
    fn inline_tags_are_dropped() {
        assert_eq!(
            html_to_text("Hello <b>bold</b> and <a href=\"x\">link</a>"),
            "Hello bold and link"
        );
    }

    #[test]
    fn blocks_become_lines() {
        assert_eq!(
            html_to_text("<p>First</p><p>Second</p>Tail<br>After"),
            "First\nSecond\nTail\nAfter"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            html_to_text("Fish &amp; Chips &mdash; &#39;ok&#39;"),
            "Fish & Chips \u{2014} 'ok'"
        );
    }

    #[test]
    fn scripts_are_hidden() {
        assert_eq!(
            html_to_text("<p>Shown</p><script>var hidden = 1;</script>"),
            "Shown"
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("   \n  "), "");
    }
}
