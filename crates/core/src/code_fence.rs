//! Fence tracking for the line-oriented pre-processor.
//!
//! Only backtick fences are tracked. Diagram fences (```` ```mermaid ````)
//! are kept apart from generic code fences: a diagram fence closes only on a
//! bare ```` ``` ```` line, and the generic toggle never fires inside one.

/// Fence phase carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    /// Not inside any fence.
    #[default]
    Outside,
    /// Inside a fenced diagram block.
    InsideDiagram,
    /// Inside a generic fenced code block.
    InsideCode,
}

/// Outcome of processing a single line for fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParseOutcome {
    /// State to carry into the next line.
    pub next_state: FenceState,
    /// Whether the line is a fence delimiter or fence content (leave it untouched).
    pub in_fence: bool,
}

const FENCE: &str = "```";

/// Advance fence state based on a single line of text.
///
/// `diagram_languages` lists the info-string tags that open a diagram fence.
pub fn advance_fence_state<S: AsRef<str>>(
    line: &str,
    state: FenceState,
    diagram_languages: &[S],
) -> LineParseOutcome {
    let trimmed = line.trim();

    if is_diagram_opener(trimmed, diagram_languages) {
        return LineParseOutcome {
            next_state: FenceState::InsideDiagram,
            in_fence: true,
        };
    }

    if state == FenceState::InsideDiagram {
        let next_state = if trimmed == FENCE {
            FenceState::Outside
        } else {
            FenceState::InsideDiagram
        };
        return LineParseOutcome {
            next_state,
            in_fence: true,
        };
    }

    if trimmed.starts_with(FENCE) {
        let next_state = match state {
            FenceState::InsideCode => FenceState::Outside,
            _ => FenceState::InsideCode,
        };
        return LineParseOutcome {
            next_state,
            in_fence: true,
        };
    }

    LineParseOutcome {
        next_state: state,
        in_fence: state == FenceState::InsideCode,
    }
}

fn is_diagram_opener<S: AsRef<str>>(trimmed: &str, diagram_languages: &[S]) -> bool {
    trimmed.strip_prefix(FENCE).is_some_and(|info| {
        diagram_languages
            .iter()
            .any(|lang| info.starts_with(lang.as_ref()))
    })
}
