use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while converting a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Conversion options could not be loaded.
    #[error("Invalid options: {0}")]
    Config(String),
}

impl ConvertError {
    /// Location of the failure, when the parser reported one.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ConvertError::Parse { location, .. } => Some(location),
            ConvertError::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Config(err.to_string())
    }
}
