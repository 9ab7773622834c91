//! Character escaping for text printed back into markdown.

use super::Dialect;

/// Where a run of text lands in the output.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EscapeContext {
    pub dialect: Dialect,
    /// Text begins a line, so block syntax (`#`, `>`, `1.`) must be neutralized.
    pub at_line_start: bool,
    /// Text sits inside `[...]`, so `]` must be escaped too.
    pub in_label: bool,
    /// Text ends an ATX heading, so a final `#` would read as a closing sequence.
    pub at_heading_end: bool,
}

/// Escape `value` so that reparsing it yields the same text node.
pub(crate) fn escape_text(value: &str, ctx: EscapeContext) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut line_start = ctx.at_line_start;
    let mut index = 0;

    while index < chars.len() {
        if line_start {
            line_start = false;
            if let Some(consumed) = escape_line_start(&chars[index..], &mut out) {
                index += consumed;
                continue;
            }
        }

        let c = chars[index];
        let next = chars.get(index + 1).copied();
        let escape = match c {
            '\n' => {
                line_start = true;
                false
            }
            '*' | '_' | '`' | '[' => true,
            ']' => ctx.in_label,
            '\\' => next.is_none_or(|n| n == '\n' || n.is_ascii_punctuation()),
            '!' => next == Some('['),
            '#' => ctx.at_heading_end && next.is_none(),
            '&' => next.is_some_and(|n| n == '#' || n.is_ascii_alphabetic()),
            '<' => match ctx.dialect {
                Dialect::Mdx => true,
                Dialect::Markdown => {
                    next.is_some_and(|n| matches!(n, '!' | '/' | '?') || n.is_ascii_alphabetic())
                }
            },
            '{' => ctx.dialect == Dialect::Mdx,
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
        index += 1;
    }

    out
}

/// Neutralize block syntax at the start of a line, returning chars consumed.
fn escape_line_start(rest: &[char], out: &mut String) -> Option<usize> {
    let first = *rest.first()?;
    let second = rest.get(1).copied();
    let line: Vec<char> = rest.iter().copied().take_while(|c| *c != '\n').collect();
    let followed_by_space = second.is_none_or(|c| c == ' ' || c == '\t' || c == '\n');

    match first {
        '#' | '>' => {
            out.push('\\');
            out.push(first);
            Some(1)
        }
        '+' | '-' if followed_by_space => {
            out.push('\\');
            out.push(first);
            Some(1)
        }
        '-' | '=' if line.iter().all(|c| *c == first || *c == ' ' || *c == '\t') => {
            out.push('\\');
            out.push(first);
            Some(1)
        }
        '~' if line.len() >= 3 && line[..3].iter().all(|c| *c == '~') => {
            out.push_str("\\~");
            Some(1)
        }
        ' ' | '\t' => {
            out.push_str(&format!("&#x{:X};", first as u32));
            Some(1)
        }
        c if c.is_ascii_digit() => {
            let digits = line.iter().take_while(|c| c.is_ascii_digit()).count();
            let delimiter = line.get(digits).copied()?;
            let after = line.get(digits + 1).copied();
            let is_marker = digits <= 9
                && matches!(delimiter, '.' | ')')
                && after.is_none_or(|c| c == ' ' || c == '\t');
            if !is_marker {
                return None;
            }
            out.extend(&line[..digits]);
            out.push('\\');
            out.push(delimiter);
            Some(digits + 1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(value: &str) -> String {
        escape_text(
            value,
            EscapeContext {
                dialect: Dialect::Markdown,
                at_line_start: true,
                in_label: false,
                at_heading_end: false,
            },
        )
    }

    fn mdx(value: &str) -> String {
        escape_text(
            value,
            EscapeContext {
                dialect: Dialect::Mdx,
                at_line_start: false,
                in_label: false,
                at_heading_end: false,
            },
        )
    }

    #[test]
    fn escapes_emphasis_and_code_markers() {
        assert_eq!(md("a*b_c`d[e]"), "a\\*b\\_c\\`d\\[e]");
    }

    #[test]
    fn escapes_backslash_before_punctuation() {
        assert_eq!(md("C:\\dir a\\*b"), "C:\\dir a\\\\\\*b");
    }

    #[test]
    fn escapes_block_syntax_at_line_start() {
        assert_eq!(md("# not a heading"), "\\# not a heading");
        assert_eq!(md("x\n> not a quote"), "x\n\\> not a quote");
        assert_eq!(md("- item"), "\\- item");
        assert_eq!(md("2024. A year"), "2024\\. A year");
        assert_eq!(md("3.14 is pi"), "3.14 is pi");
        assert_eq!(md("a\n==="), "a\n\\===");
    }

    #[test]
    fn angle_brackets_depend_on_dialect() {
        assert_eq!(md("a < b <c"), "a < b \\<c");
        assert_eq!(mdx("a < b"), "a \\< b");
    }

    #[test]
    fn braces_only_matter_in_mdx() {
        assert_eq!(md("{x}"), "{x}");
        assert_eq!(mdx("{x}"), "\\{x}");
    }

    #[test]
    fn entity_like_ampersands_are_escaped() {
        assert_eq!(mdx("&amp; & x"), "\\&amp; & x");
    }

    #[test]
    fn label_context_escapes_closing_bracket() {
        let out = escape_text(
            "a]b",
            EscapeContext {
                dialect: Dialect::Markdown,
                at_line_start: false,
                in_label: true,
                at_heading_end: false,
            },
        );
        assert_eq!(out, "a\\]b");
    }

    #[test]
    fn trailing_hash_is_escaped_at_heading_end() {
        let ctx = EscapeContext {
            dialect: Dialect::Mdx,
            at_line_start: false,
            in_label: false,
            at_heading_end: true,
        };
        assert_eq!(escape_text("C #", ctx), "C \\#");
        assert_eq!(escape_text("C# sharp", ctx), "C# sharp");
        assert_eq!(md("C #"), "C #");
    }
}
