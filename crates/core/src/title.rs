//! Document title extraction.

use markdown::mdast::Node;

/// Title used when a document has no top-level `#` heading.
pub const DEFAULT_TITLE: &str = "Default Title";

/// Concatenate the values of the direct `Text` children of a node.
///
/// Other inline kinds (emphasis, code, links) contribute nothing.
pub fn flatten_text(children: &[Node]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            Node::Text(text) => Some(text.value.as_str()),
            _ => None,
        })
        .collect()
}

/// Remove the first depth-1 heading from `content` and return its text.
///
/// Returns `None` (and leaves `content` untouched) when no top-level
/// depth-1 heading exists. Headings nested in containers are not considered.
pub fn take_title(content: &mut Vec<Node>) -> Option<String> {
    let index = content
        .iter()
        .position(|node| matches!(node, Node::Heading(heading) if heading.depth == 1))?;

    match content.remove(index) {
        Node::Heading(heading) => Some(flatten_text(&heading.children)),
        _ => None,
    }
}

/// Like [`take_title`], falling back to `default_title`.
pub fn extract_title(content: &mut Vec<Node>, default_title: &str) -> String {
    match take_title(content) {
        Some(title) => {
            log::debug!("extracted title {:?}", title);
            title
        }
        None => {
            log::debug!("no top-level heading, using {:?}", default_title);
            default_title.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ParseOptions, parse_mdast};

    fn top_level(input: &str) -> Vec<Node> {
        match parse_mdast(input, &ParseOptions::markdown()).unwrap() {
            Node::Root(root) => root.children,
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn removes_first_depth_one_heading() {
        let mut content = top_level("intro\n\n# Title\n\n## Sub\n\n# Second");
        let title = extract_title(&mut content, DEFAULT_TITLE);
        assert_eq!(title, "Title");
        assert_eq!(content.len(), 3);
        assert!(matches!(content[0], Node::Paragraph(_)));
        assert!(matches!(&content[1], Node::Heading(h) if h.depth == 2));
        assert!(matches!(&content[2], Node::Heading(h) if h.depth == 1));
    }

    #[test]
    fn defaults_without_heading() {
        let mut content = top_level("## Only a subheading\n\ntext");
        let title = extract_title(&mut content, DEFAULT_TITLE);
        assert_eq!(title, DEFAULT_TITLE);
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn ignores_nested_headings() {
        let mut content = top_level("> # Quoted\n\n* # Listed");
        assert_eq!(take_title(&mut content), None);
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn flattens_only_text_children() {
        let mut content = top_level("# Install `ghmdx` *now* today");
        assert_eq!(take_title(&mut content).as_deref(), Some("Install   today"));
        assert!(content.is_empty());
    }
}
