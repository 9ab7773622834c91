//! Line-oriented clean-up applied before the first parse.
//!
//! Strips tool directive comments and escapes raw angle brackets so the MDX
//! reparse does not read them as JSX. Fenced code, diagram fences,
//! blockquote lines and bare alert markers are left alone.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::admonition::AlertKeyword;
use crate::code_fence::{FenceState, advance_fence_state};

static VALE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*vale\s+(?:on|off)\s*-->").expect("valid vale regex"));

static GIT_CLIFF_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--\s*generated by git-cliff\s*-->").expect("valid git-cliff regex")
});

static ALERT_MARKER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[!([A-Z]+)\]").expect("valid alert marker regex"));

static HTML_TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[<\s][^>]*>").expect("valid html line regex"));

/// Pre-processor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Info-string tags that open a diagram fence.
    pub diagram_languages: Vec<String>,
    /// Leave lines that look like raw HTML tags unescaped.
    pub preserve_html_lines: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            diagram_languages: vec!["mermaid".to_string()],
            preserve_html_lines: false,
        }
    }
}

/// Prepare raw GitHub markdown for parsing.
pub fn preprocess_markdown(markdown: &str, options: &PreprocessOptions) -> String {
    let stripped = strip_directive_comments(markdown);

    let mut state = FenceState::default();
    let mut lines = Vec::new();
    for line in stripped.split('\n') {
        let outcome = advance_fence_state(line, state, &options.diagram_languages);
        if outcome.next_state != state {
            log::trace!("fence {:?} -> {:?} at {:?}", state, outcome.next_state, line);
        }
        state = outcome.next_state;

        if outcome.in_fence || is_passthrough_line(line, options) {
            lines.push(Cow::Borrowed(line));
        } else {
            lines.push(escape_angle_brackets(line));
        }
    }

    lines.join("\n")
}

/// Remove `<!-- vale on|off -->` and `<!-- generated by git-cliff -->` anywhere in the text.
pub fn strip_directive_comments(markdown: &str) -> Cow<'_, str> {
    match VALE_COMMENT.replace_all(markdown, "") {
        Cow::Borrowed(text) => GIT_CLIFF_COMMENT.replace_all(text, ""),
        Cow::Owned(text) => Cow::Owned(GIT_CLIFF_COMMENT.replace_all(&text, "").into_owned()),
    }
}

/// Whether a line is a bare GitHub alert marker such as `[!NOTE]`.
pub fn is_alert_marker_line(line: &str) -> bool {
    ALERT_MARKER_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .is_some_and(|keyword| AlertKeyword::from_marker(keyword.as_str()).is_some())
}

fn is_passthrough_line(line: &str, options: &PreprocessOptions) -> bool {
    if line.trim().starts_with('>') || is_alert_marker_line(line) {
        return true;
    }
    options.preserve_html_lines && HTML_TAG_LINE.is_match(line)
}

fn escape_angle_brackets(line: &str) -> Cow<'_, str> {
    if !line.contains(['<', '>']) {
        return Cow::Borrowed(line);
    }
    Cow::Owned(line.replace('<', "&lt;").replace('>', "&gt;"))
}
