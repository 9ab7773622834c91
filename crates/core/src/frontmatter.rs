//! Starlight front matter written ahead of the converted body.

use std::fmt;

/// Starlight page metadata written ahead of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Whether Pagefind indexes the page.
    pub pagefind: bool,
}

impl FrontMatter {
    /// Build front matter from its three fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>, pagefind: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            pagefind,
        }
    }
}

impl fmt::Display for FrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        writeln!(f, "title: {}", quote(&self.title))?;
        writeln!(f, "description: {}", quote(&self.description))?;
        writeln!(f, "pagefind: {}", self.pagefind)?;
        writeln!(f, "---")
    }
}

/// Render the front matter block, including its closing `---` line.
pub fn generate_front_matter(title: &str, description: &str, pagefind: bool) -> String {
    FrontMatter::new(title, description, pagefind).to_string()
}

/// YAML double-quoted scalar; JSON string syntax is a subset of it.
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
