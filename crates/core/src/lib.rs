#![deny(missing_docs)]
//! ghmdx core: convert GitHub-flavored documentation into Starlight MDX.

/// GitHub alert keywords and callout kinds.
pub mod admonition;
/// Alert blockquote to callout rewriting.
pub mod callout;
/// Fence tracking for the pre-processor.
pub mod code_fence;
/// Conversion entry points and options.
pub mod convert;
/// Core error types.
pub mod error;
/// Front matter rendering.
pub mod frontmatter;
/// Markdown parsing through markdown-rs.
pub mod parse;
/// Text clean-up before parsing.
pub mod preprocess;
/// Backslash removal in text nodes.
pub mod preserve;
/// mdast serialization.
pub mod stringify;
/// Title extraction.
pub mod title;

pub use admonition::{AlertKeyword, CalloutKind};
pub use callout::{AdmonitionMarker, admonition_marker, blockquote_to_callout, rewrite_callouts};
pub use convert::{ConvertOptions, Converter, transform_markdown_to_mdx};
pub use error::{ConvertError, SourceLocation};
pub use frontmatter::{FrontMatter, generate_front_matter};
pub use parse::{ParseOptions, parse_mdast};
pub use preprocess::{PreprocessOptions, preprocess_markdown};
pub use preserve::{preserve_inline_code, visit_text_mut};
pub use stringify::{Dialect, to_markdown};
pub use title::{DEFAULT_TITLE, extract_title, flatten_text, take_title};
