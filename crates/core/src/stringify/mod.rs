//! Serialize an mdast tree back into markdown or MDX source.
//!
//! Output conventions: ATX headings, `*` bullets, `*emphasis*`,
//! `**strong**`, backtick fences, `***` rules, blocks separated by a blank
//! line. Raw HTML, ESM and JSX are written back as source.

mod escape;

use escape::{EscapeContext, escape_text};
use markdown::mdast::{
    AttributeContent, AttributeValue, Blockquote, Code, Heading, List, ListItem, Node,
    ReferenceKind,
};

/// Target dialect, which decides how text is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// CommonMark.
    #[default]
    Markdown,
    /// MDX: `<` and `{` in text are always escaped.
    Mdx,
}

/// Serialize `node` (usually a root) in the given dialect.
pub fn to_markdown(node: &Node, dialect: Dialect) -> String {
    let printer = Printer { dialect };
    let out = match node {
        Node::Root(root) => printer.flow(&root.children, None),
        other => printer.flow(std::slice::from_ref(other), None),
    };
    if out.is_empty() { out } else { out + "\n" }
}

struct Printer {
    dialect: Dialect,
}

/// Where a run of phrasing content sits inside its block.
#[derive(Debug, Clone, Copy, Default)]
struct Placement {
    at_line_start: bool,
    in_label: bool,
    in_heading: bool,
}

impl Placement {
    const PARAGRAPH: Placement = Placement {
        at_line_start: true,
        in_label: false,
        in_heading: false,
    };
    const HEADING: Placement = Placement {
        at_line_start: false,
        in_label: false,
        in_heading: true,
    };
    const LABEL: Placement = Placement {
        at_line_start: false,
        in_label: true,
        in_heading: false,
    };
}

impl Printer {
    /// Print block children; `spread` is the container's flag for lists and items.
    fn flow(&self, children: &[Node], spread: Option<bool>) -> String {
        let mut out = String::new();
        let mut previous: Option<&Node> = None;
        let mut alternate = false;

        for child in children {
            alternate = match (previous, child) {
                (Some(Node::List(left)), Node::List(right)) if left.ordered == right.ordered => {
                    !alternate
                }
                _ => false,
            };

            let Some(rendered) = self.block(child, alternate) else {
                continue;
            };
            if let Some(left) = previous {
                out.push_str(join(left, child, spread));
            }
            out.push_str(&rendered);
            previous = Some(child);
        }

        out
    }

    fn block(&self, node: &Node, alternate: bool) -> Option<String> {
        let rendered = match node {
            Node::Paragraph(paragraph) => {
                self.phrasing(&paragraph.children, Placement::PARAGRAPH)
            }
            Node::Heading(heading) => self.heading(heading),
            Node::ThematicBreak(_) => "***".to_string(),
            Node::Blockquote(quote) => self.blockquote(quote),
            Node::List(list) => self.list(list, alternate),
            Node::Code(code) => fenced_code(code),
            Node::Html(html) => html.value.clone(),
            Node::Definition(definition) => format!(
                "[{}]: {}{}",
                self.label(definition.label.as_deref(), &definition.identifier),
                destination(&definition.url),
                title(definition.title.as_deref())
            ),
            Node::MdxjsEsm(esm) => esm.value.clone(),
            Node::MdxFlowExpression(expression) => format!("{{{}}}", expression.value),
            Node::MdxJsxFlowElement(element) => {
                let open = jsx_open(element.name.as_deref(), &element.attributes);
                if element.children.is_empty() {
                    return Some(jsx_self_closing(open));
                }
                let inner = indent(&self.flow(&element.children, None), "  ");
                format!(
                    "{}\n{}\n{}",
                    open,
                    inner,
                    jsx_close(element.name.as_deref())
                )
            }
            _ => {
                log::warn!("Unhandled markdown node type: {:?}", node);
                return None;
            }
        };
        Some(rendered)
    }

    fn heading(&self, heading: &Heading) -> String {
        let hashes = "#".repeat(usize::from(heading.depth.clamp(1, 6)));
        let content = self
            .phrasing(&heading.children, Placement::HEADING)
            .replace('\n', " ");
        if content.is_empty() {
            hashes
        } else {
            format!("{} {}", hashes, content)
        }
    }

    fn blockquote(&self, quote: &Blockquote) -> String {
        self.flow(&quote.children, None)
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list(&self, list: &List, alternate: bool) -> String {
        let start = list.start.unwrap_or(1);
        let separator = if list.spread { "\n\n" } else { "\n" };

        list.children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| match child {
                Node::ListItem(item) => {
                    let marker = if list.ordered {
                        let delimiter = if alternate { ')' } else { '.' };
                        format!("{}{}", start as usize + index, delimiter)
                    } else if alternate {
                        "-".to_string()
                    } else {
                        "*".to_string()
                    };
                    Some(self.list_item(item, &marker))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn list_item(&self, item: &ListItem, marker: &str) -> String {
        let content = self.flow(&item.children, Some(item.spread));
        if content.is_empty() {
            return marker.to_string();
        }

        let continuation = " ".repeat(marker.len() + 1);
        content
            .split('\n')
            .enumerate()
            .map(|(index, line)| match (index, line.is_empty()) {
                (0, _) => format!("{} {}", marker, line),
                (_, true) => String::new(),
                (_, false) => format!("{}{}", continuation, line),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn phrasing(&self, children: &[Node], placement: Placement) -> String {
        let mut out = String::new();
        for (index, child) in children.iter().enumerate() {
            let escape = EscapeContext {
                dialect: self.dialect,
                at_line_start: (placement.at_line_start && out.is_empty())
                    || out.ends_with('\n'),
                in_label: placement.in_label,
                at_heading_end: placement.in_heading && index + 1 == children.len(),
            };
            self.inline(child, escape, &mut out);
        }
        out
    }

    fn inline(&self, node: &Node, escape: EscapeContext, out: &mut String) {
        let nested = Placement {
            in_label: escape.in_label,
            ..Placement::default()
        };
        match node {
            Node::Text(text) => out.push_str(&escape_text(&text.value, escape)),
            Node::Emphasis(emphasis) => {
                out.push('*');
                out.push_str(&self.phrasing(&emphasis.children, nested));
                out.push('*');
            }
            Node::Strong(strong) => {
                out.push_str("**");
                out.push_str(&self.phrasing(&strong.children, nested));
                out.push_str("**");
            }
            Node::InlineCode(code) => out.push_str(&inline_code(&code.value)),
            Node::Break(_) => out.push_str("\\\n"),
            Node::Html(html) => out.push_str(&html.value),
            Node::Link(link) => {
                out.push('[');
                out.push_str(&self.phrasing(&link.children, Placement::LABEL));
                out.push_str("](");
                out.push_str(&destination(&link.url));
                out.push_str(&title(link.title.as_deref()));
                out.push(')');
            }
            Node::Image(image) => {
                out.push_str("![");
                out.push_str(&self.label_text(&image.alt));
                out.push_str("](");
                out.push_str(&destination(&image.url));
                out.push_str(&title(image.title.as_deref()));
                out.push(')');
            }
            Node::LinkReference(reference) => {
                out.push('[');
                out.push_str(&self.phrasing(&reference.children, Placement::LABEL));
                out.push(']');
                out.push_str(&self.reference_suffix(
                    &reference.reference_kind,
                    reference.label.as_deref(),
                    &reference.identifier,
                ));
            }
            Node::ImageReference(reference) => {
                out.push_str("![");
                out.push_str(&self.label_text(&reference.alt));
                out.push(']');
                out.push_str(&self.reference_suffix(
                    &reference.reference_kind,
                    reference.label.as_deref(),
                    &reference.identifier,
                ));
            }
            Node::MdxTextExpression(expression) => {
                out.push('{');
                out.push_str(&expression.value);
                out.push('}');
            }
            Node::MdxJsxTextElement(element) => {
                let open = jsx_open(element.name.as_deref(), &element.attributes);
                if element.children.is_empty() {
                    out.push_str(&jsx_self_closing(open));
                } else {
                    out.push_str(&open);
                    out.push_str(&self.phrasing(&element.children, nested));
                    out.push_str(&jsx_close(element.name.as_deref()));
                }
            }
            _ => log::warn!("Unhandled markdown node type: {:?}", node),
        }
    }

    fn label_text(&self, value: &str) -> String {
        escape_text(
            value,
            EscapeContext {
                dialect: self.dialect,
                at_line_start: false,
                in_label: true,
                at_heading_end: false,
            },
        )
    }

    fn label(&self, label: Option<&str>, identifier: &str) -> String {
        self.label_text(label.unwrap_or(identifier))
    }

    fn reference_suffix(
        &self,
        kind: &ReferenceKind,
        label: Option<&str>,
        identifier: &str,
    ) -> String {
        match kind {
            ReferenceKind::Full => format!("[{}]", self.label(label, identifier)),
            ReferenceKind::Collapsed => "[]".to_string(),
            ReferenceKind::Shortcut => String::new(),
        }
    }
}

/// Blank-line policy between two sibling blocks.
fn join(left: &Node, right: &Node, spread: Option<bool>) -> &'static str {
    match spread {
        Some(_)
            if matches!(left, Node::Paragraph(_))
                && matches!(right, Node::Paragraph(_) | Node::Definition(_)) =>
        {
            "\n\n"
        }
        Some(false) => "\n",
        _ => "\n\n",
    }
}

fn fenced_code(code: &Code) -> String {
    let size = (longest_run(&code.value, '`') + 1).max(3);
    let fence = "`".repeat(size);

    let mut out = fence.clone();
    if let Some(lang) = code.lang.as_deref() {
        out.push_str(lang);
        if let Some(meta) = code.meta.as_deref() {
            out.push(' ');
            out.push_str(meta);
        }
    }
    out.push('\n');
    if !code.value.is_empty() {
        out.push_str(&code.value);
        out.push('\n');
    }
    out.push_str(&fence);
    out
}

fn inline_code(value: &str) -> String {
    let runs = backtick_runs(value);
    let mut size = 1;
    while runs.contains(&size) {
        size += 1;
    }
    let fence = "`".repeat(size);

    let pad = !value.is_empty()
        && (value.starts_with('`')
            || value.ends_with('`')
            || (value.starts_with(' ') && value.ends_with(' ') && !value.trim().is_empty()));
    let space = if pad { " " } else { "" };
    format!("{fence}{space}{value}{space}{fence}")
}

fn backtick_runs(value: &str) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0;
    for c in value.chars() {
        if c == '`' {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

fn longest_run(value: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in value.chars() {
        if c == marker {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn destination(url: &str) -> String {
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return format!("<{}>", url.replace('<', "\\<").replace('>', "\\>"));
    }
    url.replace('(', "\\(").replace(')', "\\)")
}

fn title(title: Option<&str>) -> String {
    match title {
        Some(title) => format!(" \"{}\"", title.replace('"', "\\\"")),
        None => String::new(),
    }
}

fn jsx_open(name: Option<&str>, attributes: &[AttributeContent]) -> String {
    let Some(name) = name else {
        return "<>".to_string();
    };

    let mut tag = format!("<{}", name);
    for attribute in attributes {
        tag.push(' ');
        match attribute {
            AttributeContent::Expression(expression) => {
                tag.push('{');
                tag.push_str(&expression.value);
                tag.push('}');
            }
            AttributeContent::Property(property) => {
                tag.push_str(&property.name);
                match &property.value {
                    None => {}
                    Some(AttributeValue::Literal(value)) => {
                        tag.push_str("=\"");
                        tag.push_str(&value.replace('"', "&quot;"));
                        tag.push('"');
                    }
                    Some(AttributeValue::Expression(expression)) => {
                        tag.push_str("={");
                        tag.push_str(&expression.value);
                        tag.push('}');
                    }
                }
            }
        }
    }
    tag.push('>');
    tag
}

fn jsx_self_closing(open: String) -> String {
    match open.strip_suffix('>') {
        Some(head) if open != "<>" => format!("{} />", head),
        _ => "<></>".to_string(),
    }
}

fn jsx_close(name: Option<&str>) -> String {
    format!("</{}>", name.unwrap_or(""))
}

fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
