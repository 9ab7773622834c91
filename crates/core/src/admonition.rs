//! GitHub alert keywords and the callout kinds they map to.

use std::fmt;

/// Alert keywords GitHub recognizes in `> [!KEYWORD]` blockquotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKeyword {
    /// `[!NOTE]`
    Note,
    /// `[!TIP]`
    Tip,
    /// `[!IMPORTANT]`
    Important,
    /// `[!WARNING]`
    Warning,
    /// `[!CAUTION]`
    Caution,
}

impl AlertKeyword {
    /// Every GitHub alert keyword.
    pub const ALL: [AlertKeyword; 5] = [
        AlertKeyword::Tip,
        AlertKeyword::Note,
        AlertKeyword::Warning,
        AlertKeyword::Important,
        AlertKeyword::Caution,
    ];

    /// Exact-case lookup; GitHub only renders uppercase markers.
    pub fn from_marker(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == keyword)
    }

    /// Uppercase spelling as written inside the marker.
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertKeyword::Note => "NOTE",
            AlertKeyword::Tip => "TIP",
            AlertKeyword::Important => "IMPORTANT",
            AlertKeyword::Warning => "WARNING",
            AlertKeyword::Caution => "CAUTION",
        }
    }

    /// Callout this alert becomes, if the target dialect has one.
    pub const fn callout_kind(self) -> Option<CalloutKind> {
        match self {
            AlertKeyword::Note => Some(CalloutKind::Note),
            AlertKeyword::Tip => Some(CalloutKind::Tip),
            AlertKeyword::Warning | AlertKeyword::Caution => Some(CalloutKind::Caution),
            AlertKeyword::Important => None,
        }
    }
}

/// Callout kinds supported by Starlight's `:::kind` asides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalloutKind {
    /// `:::caution`
    Caution,
    /// `:::note`
    Note,
    /// `:::tip`
    Tip,
}

impl CalloutKind {
    /// Normalize a marker keyword in any case (`warning`, `Note`, `TIP`).
    ///
    /// `WARNING` folds into `caution`; anything outside the closed set
    /// (including `IMPORTANT`) yields `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let upper = keyword.to_ascii_uppercase();
        AlertKeyword::from_marker(&upper).and_then(AlertKeyword::callout_kind)
    }

    /// Lowercase directive name.
    pub const fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Caution => "caution",
            CalloutKind::Note => "note",
            CalloutKind::Tip => "tip",
        }
    }

    /// The bracketed marker form of this kind, e.g. `[!CAUTION]`.
    pub fn marker(self) -> String {
        format!("[!{}]", self.as_str().to_ascii_uppercase())
    }
}

impl fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_maps_to_caution() {
        assert_eq!(CalloutKind::from_keyword("WARNING"), Some(CalloutKind::Caution));
        assert_eq!(CalloutKind::from_keyword("warning"), Some(CalloutKind::Caution));
    }

    #[test]
    fn recognized_keywords_lowercase_directly() {
        assert_eq!(CalloutKind::from_keyword("NOTE"), Some(CalloutKind::Note));
        assert_eq!(CalloutKind::from_keyword("Tip"), Some(CalloutKind::Tip));
        assert_eq!(CalloutKind::from_keyword("caution"), Some(CalloutKind::Caution));
    }

    #[test]
    fn important_and_unknown_have_no_callout() {
        assert_eq!(CalloutKind::from_keyword("IMPORTANT"), None);
        assert_eq!(CalloutKind::from_keyword("BOGUS"), None);
        assert_eq!(CalloutKind::from_keyword(""), None);
    }

    #[test]
    fn marker_lookup_is_case_sensitive() {
        assert_eq!(AlertKeyword::from_marker("TIP"), Some(AlertKeyword::Tip));
        assert_eq!(AlertKeyword::from_marker("tip"), None);
    }

    #[test]
    fn marker_uses_uppercase_kind() {
        assert_eq!(CalloutKind::Caution.marker(), "[!CAUTION]");
        assert_eq!(CalloutKind::Tip.to_string(), "tip");
    }
}
