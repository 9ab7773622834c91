//! Undo backslash escaping in text nodes before re-serialization.

use markdown::mdast::{Node, Text};

/// Visit every `Text` node under `nodes`, depth-first, at any nesting.
pub fn visit_text_mut<F>(nodes: &mut [Node], visit: &mut F)
where
    F: FnMut(&mut Text),
{
    for node in nodes {
        match node {
            Node::Text(text) => visit(text),
            other => {
                if let Some(children) = other.children_mut() {
                    visit_text_mut(children, visit);
                }
            }
        }
    }
}

/// Remove every backslash from every text node; other nodes are untouched.
pub fn preserve_inline_code(nodes: &mut [Node]) {
    visit_text_mut(nodes, &mut |text| {
        if text.value.contains('\\') {
            text.value = text.value.replace('\\', "");
        }
    });
}
