//! Markdown parsing through markdown-rs.

use crate::{ConvertError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser presets mapped onto markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Plain CommonMark, as GitHub docs are authored.
    pub const fn markdown() -> Self {
        Self {
            mdx: false,
            code_indented: true,
            raw_html: true,
        }
    }

    /// CommonMark with MDX constructs; HTML and indented code are not part of MDX.
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            code_indented: false,
            raw_html: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            autolink: !self.mdx,
            ..Default::default()
        };

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parse markdown into an MDAST tree.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, ConvertError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| ConvertError::Parse {
        message: err.reason.clone(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
