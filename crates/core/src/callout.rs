//! Rewrites GitHub alert blockquotes into Starlight `:::kind` callouts.
//!
//! ```text
//! > [!WARNING]
//! > Back up first.
//! ```
//!
//! becomes a raw block `:::caution\nBack up first.\n:::`. Blockquotes
//! without a recognized marker are kept as they are.

use markdown::mdast::{Blockquote, Html, Node};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::admonition::CalloutKind;
use crate::title::flatten_text;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[!([A-Za-z0-9_]+)\]").expect("valid marker regex"));

/// A blockquote's admonition marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmonitionMarker {
    /// Normalized callout kind.
    pub kind: CalloutKind,
    /// Keyword exactly as matched inside `[!...]`.
    pub keyword: String,
}

/// Rewrite every top-level alert blockquote in place, preserving order.
pub fn rewrite_callouts(content: Vec<Node>) -> Vec<Node> {
    content
        .into_iter()
        .map(|node| match node {
            Node::Blockquote(quote) => match blockquote_to_callout(&quote) {
                Some(callout) => callout,
                None => Node::Blockquote(quote),
            },
            other => other,
        })
        .collect()
}

/// Detect the admonition marker at the start of a blockquote's first paragraph.
pub fn admonition_marker(quote: &Blockquote) -> Option<AdmonitionMarker> {
    let Some(Node::Paragraph(first)) = quote.children.first() else {
        return None;
    };
    let text = flatten_text(&first.children);
    let keyword = MARKER.captures(text.trim())?.get(1)?.as_str().to_string();
    let kind = CalloutKind::from_keyword(&keyword)?;
    Some(AdmonitionMarker { kind, keyword })
}

/// Build the callout replacing `quote`, or `None` when it is not an alert.
pub fn blockquote_to_callout(quote: &Blockquote) -> Option<Node> {
    let Some(marker) = admonition_marker(quote) else {
        log::debug!("blockquote has no recognized alert marker, keeping it");
        return None;
    };

    let body = render_body(&quote.children);
    let cleaned = clean_marker(&body, &marker);
    log::debug!("rewrote [!{}] blockquote into :::{}", marker.keyword, marker.kind);

    Some(Node::Html(Html {
        value: format!(":::{}\n{}\n:::", marker.kind, cleaned),
        position: quote.position.clone(),
    }))
}

/// Flatten blockquote children into callout text, one line group per block.
fn render_body(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| match child {
            Node::Paragraph(paragraph) => paragraph
                .children
                .iter()
                .map(|inline| match inline {
                    Node::Text(text) => text.value.clone(),
                    Node::InlineCode(code) => format!("`{}`", code.value),
                    _ => String::new(),
                })
                .collect::<String>(),
            Node::Code(code) => format!("`{}`", code.value),
            _ => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop the first `[!KIND]` and the first `[!KEYWORD]`, then trim.
///
/// Both removals always run; when the forms are equal the second finds
/// nothing unless the marker was repeated.
fn clean_marker(body: &str, marker: &AdmonitionMarker) -> String {
    let normalized = marker.kind.marker();
    let as_written = format!("[!{}]", marker.keyword.to_ascii_uppercase());
    body.replacen(&normalized, "", 1)
        .replacen(&as_written, "", 1)
        .trim()
        .to_string()
}
