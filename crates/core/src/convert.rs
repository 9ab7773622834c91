//! GitHub markdown to Starlight MDX conversion entry points.

use markdown::mdast::{Node, Root};
use serde::Deserialize;

use crate::callout::rewrite_callouts;
use crate::frontmatter::FrontMatter;
use crate::parse::{ParseOptions, parse_mdast};
use crate::preprocess::{PreprocessOptions, preprocess_markdown};
use crate::preserve::preserve_inline_code;
use crate::stringify::{Dialect, to_markdown};
use crate::title::{DEFAULT_TITLE, extract_title};
use crate::ConvertError;

/// Conversion settings shared by every document a [`Converter`] handles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Whether Pagefind should index converted pages.
    pub pagefind: bool,
    /// Title used when a document has no top-level `#` heading.
    #[serde(alias = "defaultTitle")]
    pub default_title: String,
    /// Fence info strings treated as diagrams by the pre-processor.
    #[serde(alias = "diagramLanguages")]
    pub diagram_languages: Vec<String>,
    /// Leave raw HTML tag lines unescaped.
    #[serde(alias = "preserveHtmlLines")]
    pub preserve_html_lines: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pagefind: true,
            default_title: DEFAULT_TITLE.to_string(),
            diagram_languages: vec!["mermaid".to_string()],
            preserve_html_lines: false,
        }
    }
}

impl ConvertOptions {
    /// Load options from a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The pre-processor's share of these options.
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            diagram_languages: self.diagram_languages.clone(),
            preserve_html_lines: self.preserve_html_lines,
        }
    }
}

/// Converts documents with a fixed set of options.
///
/// Each call owns its trees and buffers, so one converter can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one document, prepending front matter built from its title.
    pub fn convert(&self, markdown: &str, description: &str) -> Result<String, ConvertError> {
        let preprocessed = preprocess_markdown(markdown, &self.options.preprocess_options());
        let mut content = match parse_mdast(&preprocessed, &ParseOptions::markdown())? {
            Node::Root(root) => root.children,
            other => vec![other],
        };

        let title = extract_title(&mut content, &self.options.default_title);
        let mut content = rewrite_callouts(content);
        preserve_inline_code(&mut content);

        let intermediate = to_markdown(
            &Node::Root(Root {
                children: content,
                position: None,
            }),
            Dialect::Markdown,
        );
        let reparsed = parse_mdast(&intermediate, &ParseOptions::mdx())?;
        let body = to_markdown(&reparsed, Dialect::Mdx);

        let front_matter = FrontMatter::new(title, description, self.options.pagefind);
        Ok(format!("{}\n{}", front_matter, body))
    }
}

/// Convert GitHub markdown into Starlight MDX with front matter.
///
/// `pagefind` defaults to `true`. Fails only when the MDX reparse rejects the
/// intermediate text.
pub fn transform_markdown_to_mdx(
    markdown: &str,
    description: &str,
    pagefind: Option<bool>,
) -> Result<String, ConvertError> {
    let options = ConvertOptions {
        pagefind: pagefind.unwrap_or(true),
        ..ConvertOptions::default()
    };
    Converter::new(options).convert(markdown, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_from_empty_json() {
        let options = ConvertOptions::from_json("{}").unwrap();
        assert_eq!(options, ConvertOptions::default());
        assert!(options.pagefind);
        assert_eq!(options.default_title, "Default Title");
    }

    #[test]
    fn options_accept_camel_case() {
        let options = ConvertOptions::from_json(
            r#"{"pagefind": false, "defaultTitle": "Untitled", "diagramLanguages": ["mermaid", "d2"]}"#,
        )
        .unwrap();
        assert!(!options.pagefind);
        assert_eq!(options.default_title, "Untitled");
        assert_eq!(options.preprocess_options().diagram_languages, ["mermaid", "d2"]);
    }

    #[test]
    fn invalid_options_are_config_errors() {
        let err = ConvertOptions::from_json(r#"{"pagefind": "yes"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn converter_uses_default_title() {
        let converter = Converter::new(ConvertOptions {
            default_title: "Untitled".into(),
            ..Default::default()
        });
        let out = converter.convert("Just text.\n", "d").unwrap();
        assert!(out.starts_with("---\ntitle: \"Untitled\"\n"));
    }

    #[test]
    fn converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
